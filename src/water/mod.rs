//! 순환수 수질 계산 모듈을 모아둔다.
//! 분석값 스냅샷/농축, 포화·부식 지수 계산으로 구성한다.

pub mod composition;
pub mod indices;

pub use composition::WaterComposition;
pub use indices::{compute_indices, compute_indices_with, CaPo4Model, Indices};

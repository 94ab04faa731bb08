//! 개방 순환 냉각수 계통 계산 모듈을 모아둔다.
//! 설계 조건, 농축 한계 기준, 농축배수 탐색, 물수지로 구성한다.

pub mod constraints;
pub mod cycles;
pub mod design;
pub mod water_balance;

pub use constraints::{ConstraintSet, StopReason};
pub use cycles::{
    simulate_cycles, simulate_cycles_with, SimulationError, SimulationResult, SimulationSettings,
    SimulationStep,
};
pub use design::DesignParameters;
pub use water_balance::{compute_water_balance, WaterBalance};

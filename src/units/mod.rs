//! 시나리오 입력에 쓰이는 단위 정의 및 변환 모듈 모음.
//! 엔진 내부는 m³/h, m³, °C, µS/cm 기준으로만 계산한다.

pub mod conductivity;
pub mod flow;
pub mod temperature;
pub mod volume;

pub use conductivity::{convert_conductivity, ConductivityUnit};
pub use flow::{convert_flow, FlowUnit};
pub use temperature::{
    convert_temperature, convert_temperature_diff, TemperatureDiffUnit, TemperatureUnit,
};
pub use volume::{convert_volume, VolumeUnit};

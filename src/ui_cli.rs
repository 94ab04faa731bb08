//! 계산 결과를 터미널용 텍스트 보고서로 만든다.

use crate::config::ReportSettings;
use crate::cooling::cycles::PhModel;
use crate::cooling::{DesignParameters, SimulationResult, SimulationStep, StopReason, WaterBalance};
use crate::i18n::{keys, Translator};
use crate::scenario::ProjectInfo;
use crate::water::indices::{LsiTendency, RsiTendency};
use crate::water::{Indices, WaterComposition};

/// 보고서 한 건에 필요한 입력/결과 묶음.
pub struct Report<'a> {
    pub project: &'a ProjectInfo,
    pub makeup: &'a WaterComposition,
    pub design: &'a DesignParameters,
    pub result: &'a SimulationResult,
    pub balance: &'a WaterBalance,
}

/// 보고서를 표준출력에 출력한다.
pub fn print_report(tr: &Translator, report: &Report, settings: &ReportSettings) {
    println!("{}", render_report(tr, report, settings));
}

/// 보고서 전체를 문자열로 만든다.
pub fn render_report(tr: &Translator, report: &Report, settings: &ReportSettings) -> String {
    let mut lines = Vec::new();
    lines.push(tr.t(keys::REPORT_TITLE).to_string());
    project_lines(tr, report.project, &mut lines);
    design_lines(tr, report.design, report.result, &mut lines);
    water_lines(tr, report.makeup, &report.result.last_safe.water, &mut lines);
    result_lines(tr, report.result, &mut lines);
    index_lines(tr, &report.result.last_safe.indices, &mut lines);
    balance_lines(tr, report.balance, &mut lines);
    if settings.show_history {
        history_lines(tr, &report.result.history, settings.history_stride, &mut lines);
    }
    warning_lines(tr, report.result, report.balance, &mut lines);
    lines.join("\n")
}

fn project_lines(tr: &Translator, project: &ProjectInfo, lines: &mut Vec<String>) {
    let fields = [
        (keys::PROJECT_CLIENT, &project.client),
        (keys::PROJECT_LOCATION, &project.location),
        (keys::PROJECT_SYSTEM_ID, &project.system_id),
        (keys::PROJECT_DATE, &project.date),
    ];
    for (key, value) in fields {
        if !value.is_empty() {
            lines.push(format!("{}: {}", tr.t(key), value));
        }
    }
}

fn design_lines(
    tr: &Translator,
    design: &DesignParameters,
    result: &SimulationResult,
    lines: &mut Vec<String>,
) {
    lines.push(tr.t(keys::SECTION_DESIGN).to_string());
    let rows = [
        (keys::DESIGN_CIRCULATION, format!("{:.1} m³/h", design.circulation_rate_m3_h)),
        (keys::DESIGN_DELTA_T, format!("{:.1} °C", design.delta_t_c)),
        (keys::DESIGN_BASIN_TEMP, format!("{:.1} °C", design.basin_temp_c)),
        (keys::DESIGN_SKIN_TEMP, format!("{:.1} °C", result.skin_temp_c)),
        (keys::DESIGN_LOAD, format!("{:.0} %", design.heat_load_fraction * 100.0)),
        (keys::DESIGN_VOLUME, format!("{:.1} m³", design.system_volume_m3)),
        (keys::DESIGN_PROCESS_LOSS, format!("{:.2} m³/h", design.process_loss_m3_h)),
    ];
    for (key, value) in rows {
        lines.push(format!("  {:<24} {}", tr.t(key), value));
    }
    let mode = match result.ph_model {
        PhModel::Natural { ceiling } => {
            format!("{} (pH ≤ {:.1})", tr.t(keys::PH_MODE_NATURAL), ceiling)
        }
        PhModel::AcidFeed { target_ph, .. } => {
            format!("{} {:.2}", tr.t(keys::PH_MODE_ACID), target_ph)
        }
    };
    lines.push(format!("  {:<24} {}", tr.t(keys::DESIGN_PH_MODE), mode));
}

fn water_lines(
    tr: &Translator,
    makeup: &WaterComposition,
    concentrated: &WaterComposition,
    lines: &mut Vec<String>,
) {
    lines.push(tr.t(keys::SECTION_WATER).to_string());
    lines.push(format!("  {:<14} {:>12} {:>12}", tr.t(keys::WATER_HEADER), "makeup", "circ."));
    lines.push(format!("  {:<14} {:>12.2} {:>12.2}", "pH", makeup.ph, concentrated.ph));
    for ((name, raw), (_, conc)) in makeup
        .labelled_ions()
        .into_iter()
        .zip(concentrated.labelled_ions())
    {
        // 미분석 성분은 생략
        if raw == 0.0 && conc == 0.0 {
            continue;
        }
        lines.push(format!("  {:<14} {:>12.2} {:>12.2}", name, raw, conc));
    }
    lines.push(format!(
        "  {:<14} {:>12.2} {:>12.2}",
        "Total-H",
        makeup.total_hardness(),
        concentrated.total_hardness()
    ));
}

fn result_lines(tr: &Translator, result: &SimulationResult, lines: &mut Vec<String>) {
    lines.push(tr.t(keys::SECTION_RESULT).to_string());
    lines.push(format!(
        "  {:<24} {:.1}",
        tr.t(keys::RESULT_MAX_CYCLE),
        result.max_cycle()
    ));
    lines.push(format!(
        "  {:<24} {}",
        tr.t(keys::RESULT_STOP_REASON),
        stop_reason_text(tr, result.stop_reason)
    ));
    if let Some(step) = result.limiting_step() {
        lines.push(format!("  {:<24} {:.1}", tr.t(keys::RESULT_LIMIT_AT), step.cycle));
    }
    lines.push(format!(
        "  {:<24} {:.1}",
        tr.t(keys::RESULT_HYDRAULIC_CEILING),
        result.hydraulic_ceiling
    ));
    lines.push(format!("  {:<24} {}", tr.t(keys::RESULT_STEPS), result.history.len()));
}

fn index_lines(tr: &Translator, indices: &Indices, lines: &mut Vec<String>) {
    lines.push(tr.t(keys::SECTION_INDICES).to_string());
    if indices.is_sentinel() {
        lines.push(format!("  LSI/RSI/PSI: {}", tr.t(keys::INDEX_NOT_APPLICABLE)));
    } else {
        lines.push(format!(
            "  {:<14} {:>10.2}  ({})",
            "LSI",
            indices.lsi,
            lsi_text(tr, indices.lsi_tendency())
        ));
        lines.push(format!(
            "  {:<14} {:>10.2}  ({})",
            "RSI",
            indices.rsi,
            rsi_text(tr, indices.rsi_tendency())
        ));
        lines.push(format!("  {:<14} {:>10.2}", "PSI", indices.psi));
        if let Some(ph_s) = indices.ph_s {
            lines.push(format!("  {:<14} {:>10.2}", "pHs", ph_s));
        }
    }
    lines.push(format!("  {:<14} {:>10.2}", "Larson-Skold", indices.larson_skold));
    lines.push(format!("  {:<14} {:>10.0}", "Ca×SO4", indices.ca_so4));
    lines.push(format!("  {:<14} {:>10.0}", "Mg×SiO2", indices.mg_sio2));
    lines.push(format!("  {:<14} {:>10.1}", "Ca×PO4", indices.ca_po4));
}

fn balance_lines(tr: &Translator, balance: &WaterBalance, lines: &mut Vec<String>) {
    lines.push(tr.t(keys::SECTION_BALANCE).to_string());
    let flows = [
        (keys::BALANCE_EVAPORATION, balance.evaporation_m3_h),
        (keys::BALANCE_WINDAGE, balance.windage_m3_h),
        (keys::BALANCE_TOTAL_BLOWDOWN, balance.total_blowdown_m3_h),
        (keys::BALANCE_CONTROLLED_BLOWDOWN, balance.controlled_blowdown_m3_h),
        (keys::BALANCE_LIQUID_LOSS, balance.liquid_loss_m3_h),
        (keys::BALANCE_MAKEUP, balance.makeup_m3_h),
    ];
    for (key, value) in flows {
        lines.push(format!("  {:<24} {:>10.2} m³/h", tr.t(key), value));
    }
    lines.push(format!(
        "  {:<24} {:>10.1} h",
        tr.t(keys::BALANCE_RETENTION),
        balance.retention_time_h
    ));
    lines.push(format!(
        "  {:<24} {:>10.1} h",
        tr.t(keys::BALANCE_HALF_LIFE),
        balance.half_life_h
    ));
}

fn history_lines(
    tr: &Translator,
    history: &[SimulationStep],
    stride: usize,
    lines: &mut Vec<String>,
) {
    lines.push(tr.t(keys::SECTION_HISTORY).to_string());
    lines.push(format!("  {}", tr.t(keys::HISTORY_HEADER)));
    let stride = stride.max(1);
    let last = history.len().saturating_sub(1);
    for (i, step) in history.iter().enumerate() {
        if i % stride != 0 && i != last {
            continue;
        }
        let note = step
            .stop_reason
            .map(|r| stop_reason_text(tr, r).to_string())
            .unwrap_or_default();
        lines.push(format!(
            "  {:<6.1} {:>6.2} {:>7.2} {:>7.2} {:>7.1} {:>10.0}   {}",
            step.cycle,
            step.water.ph,
            step.indices.lsi,
            step.indices.rsi,
            step.water.silica,
            step.indices.ca_so4,
            note
        ));
    }
}

fn warning_lines(
    tr: &Translator,
    result: &SimulationResult,
    balance: &WaterBalance,
    lines: &mut Vec<String>,
) {
    lines.push(tr.t(keys::SECTION_WARNINGS).to_string());
    let all: Vec<&String> = result.warnings.iter().chain(&balance.warnings).collect();
    if all.is_empty() {
        lines.push(format!("  {}", tr.t(keys::NO_WARNINGS)));
    }
    for w in all {
        lines.push(format!("  - {w}"));
    }
}

/// 정지 사유를 선택 언어로 표시한다.
pub fn stop_reason_text(tr: &Translator, reason: StopReason) -> &str {
    let key = match reason {
        StopReason::HydraulicLimit => keys::STOP_HYDRAULIC,
        StopReason::SilicaLimit => keys::STOP_SILICA,
        StopReason::LsiLimit => keys::STOP_LSI,
        StopReason::GypsumRisk => keys::STOP_GYPSUM,
        StopReason::CalciumPhosphateRisk => keys::STOP_CA_PO4,
        StopReason::MagnesiumSilicateRisk => keys::STOP_MG_SILICATE,
        StopReason::MaxCycleCeiling => keys::STOP_MAX_CYCLE,
    };
    tr.t(key)
}

fn lsi_text(tr: &Translator, tendency: LsiTendency) -> &str {
    tr.t(match tendency {
        LsiTendency::Corrosive => keys::TENDENCY_CORROSIVE,
        LsiTendency::Balanced => keys::TENDENCY_BALANCED,
        LsiTendency::MildScaling => keys::TENDENCY_MILD_SCALING,
        LsiTendency::Scaling => keys::TENDENCY_SCALING,
    })
}

fn rsi_text(tr: &Translator, tendency: RsiTendency) -> &str {
    tr.t(match tendency {
        RsiTendency::HeavyScale => keys::TENDENCY_HEAVY_SCALE,
        RsiTendency::LightScale => keys::TENDENCY_LIGHT_SCALE,
        RsiTendency::Stable => keys::TENDENCY_STABLE,
        RsiTendency::Corrosive => keys::TENDENCY_CORROSIVE,
    })
}

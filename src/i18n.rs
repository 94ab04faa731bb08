use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";

    pub const REPORT_TITLE: &str = "report.title";
    pub const PROJECT_CLIENT: &str = "project.client";
    pub const PROJECT_LOCATION: &str = "project.location";
    pub const PROJECT_SYSTEM_ID: &str = "project.system_id";
    pub const PROJECT_DATE: &str = "project.date";

    pub const SECTION_DESIGN: &str = "section.design";
    pub const SECTION_WATER: &str = "section.water";
    pub const SECTION_RESULT: &str = "section.result";
    pub const SECTION_INDICES: &str = "section.indices";
    pub const SECTION_BALANCE: &str = "section.balance";
    pub const SECTION_HISTORY: &str = "section.history";
    pub const SECTION_WARNINGS: &str = "section.warnings";

    pub const DESIGN_CIRCULATION: &str = "design.circulation";
    pub const DESIGN_DELTA_T: &str = "design.delta_t";
    pub const DESIGN_BASIN_TEMP: &str = "design.basin_temp";
    pub const DESIGN_SKIN_TEMP: &str = "design.skin_temp";
    pub const DESIGN_LOAD: &str = "design.load";
    pub const DESIGN_VOLUME: &str = "design.volume";
    pub const DESIGN_PROCESS_LOSS: &str = "design.process_loss";
    pub const DESIGN_PH_MODE: &str = "design.ph_mode";
    pub const PH_MODE_NATURAL: &str = "ph_mode.natural";
    pub const PH_MODE_ACID: &str = "ph_mode.acid";

    pub const WATER_HEADER: &str = "water.header";

    pub const RESULT_MAX_CYCLE: &str = "result.max_cycle";
    pub const RESULT_STOP_REASON: &str = "result.stop_reason";
    pub const RESULT_LIMIT_AT: &str = "result.limit_at";
    pub const RESULT_HYDRAULIC_CEILING: &str = "result.hydraulic_ceiling";
    pub const RESULT_STEPS: &str = "result.steps";

    pub const STOP_HYDRAULIC: &str = "stop.hydraulic";
    pub const STOP_SILICA: &str = "stop.silica";
    pub const STOP_LSI: &str = "stop.lsi";
    pub const STOP_GYPSUM: &str = "stop.gypsum";
    pub const STOP_CA_PO4: &str = "stop.ca_po4";
    pub const STOP_MG_SILICATE: &str = "stop.mg_silicate";
    pub const STOP_MAX_CYCLE: &str = "stop.max_cycle";

    pub const TENDENCY_CORROSIVE: &str = "tendency.corrosive";
    pub const TENDENCY_BALANCED: &str = "tendency.balanced";
    pub const TENDENCY_MILD_SCALING: &str = "tendency.mild_scaling";
    pub const TENDENCY_SCALING: &str = "tendency.scaling";
    pub const TENDENCY_HEAVY_SCALE: &str = "tendency.heavy_scale";
    pub const TENDENCY_LIGHT_SCALE: &str = "tendency.light_scale";
    pub const TENDENCY_STABLE: &str = "tendency.stable";
    pub const INDEX_NOT_APPLICABLE: &str = "index.not_applicable";

    pub const BALANCE_EVAPORATION: &str = "balance.evaporation";
    pub const BALANCE_WINDAGE: &str = "balance.windage";
    pub const BALANCE_TOTAL_BLOWDOWN: &str = "balance.total_blowdown";
    pub const BALANCE_CONTROLLED_BLOWDOWN: &str = "balance.controlled_blowdown";
    pub const BALANCE_LIQUID_LOSS: &str = "balance.liquid_loss";
    pub const BALANCE_MAKEUP: &str = "balance.makeup";
    pub const BALANCE_RETENTION: &str = "balance.retention";
    pub const BALANCE_HALF_LIFE: &str = "balance.half_life";

    pub const HISTORY_HEADER: &str = "history.header";
    pub const NO_WARNINGS: &str = "warnings.none";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("en") {
            Language::En
        } else {
            Language::Ko
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 ko로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리(locales/ 등)를 받아서 번역기를 생성한다.
    /// 디렉터리나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code));
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    /// 번역을 가져온다. 언어팩 → 선택 언어 → 한국어 순으로 찾는다.
    pub fn t<'a>(&'a self, key: &str) -> &'a str {
        if let Some(v) = self.overrides.as_ref().and_then(|m| m.get(key)) {
            return v.as_str();
        }
        match self.lang {
            Language::En => en(key).unwrap_or_else(|| ko(key)),
            Language::Ko => ko(key),
        }
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko".into()),
        "en" => Some("en".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(lang) = get_locale().and_then(|loc| normalize_locale_string(&loc)) {
        return Some(lang);
    }
    ["LANG", "LC_ALL"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|v| normalize_locale_string(&v))
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 또는 [section] 표.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let path = Path::new(dir).join(format!("{lang}.toml"));
    let content = fs::read_to_string(path).ok()?;
    parse_toml_to_map(&content)
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

fn ko(key: &str) -> &'static str {
    use keys::*;
    match key {
        ERROR_PREFIX => "오류",
        REPORT_TITLE => "=== 냉각탑 농축배수 분석 보고서 ===",
        PROJECT_CLIENT => "고객",
        PROJECT_LOCATION => "위치",
        PROJECT_SYSTEM_ID => "시스템 ID",
        PROJECT_DATE => "일자",
        SECTION_DESIGN => "\n-- 설계 조건 --",
        SECTION_WATER => "\n-- 수질 (보충수 / 최대 농축 시) --",
        SECTION_RESULT => "\n-- 농축 한계 --",
        SECTION_INDICES => "\n-- 최대 농축 시 지수 (표면 온도 기준) --",
        SECTION_BALANCE => "\n-- 물수지 --",
        SECTION_HISTORY => "\n-- 단계별 이력 --",
        SECTION_WARNINGS => "\n-- 경고 --",
        DESIGN_CIRCULATION => "순환수량",
        DESIGN_DELTA_T => "온도차 ΔT",
        DESIGN_BASIN_TEMP => "수조 온도",
        DESIGN_SKIN_TEMP => "표면(skin) 온도",
        DESIGN_LOAD => "열부하율",
        DESIGN_VOLUME => "보유수량",
        DESIGN_PROCESS_LOSS => "공정 손실",
        DESIGN_PH_MODE => "pH 모델",
        PH_MODE_NATURAL => "자연 농축",
        PH_MODE_ACID => "산 주입, 목표 pH",
        WATER_HEADER => "항목",
        RESULT_MAX_CYCLE => "권장 최대 농축배수",
        RESULT_STOP_REASON => "정지 사유",
        RESULT_LIMIT_AT => "위반 배수",
        RESULT_HYDRAULIC_CEILING => "수리 한계 배수",
        RESULT_STEPS => "계산 단계 수",
        STOP_HYDRAULIC => "수리 한계",
        STOP_SILICA => "실리카 한계",
        STOP_LSI => "LSI 한계",
        STOP_GYPSUM => "석고(CaSO₄) 위험",
        STOP_CA_PO4 => "인산칼슘 위험",
        STOP_MG_SILICATE => "규산마그네슘 위험",
        STOP_MAX_CYCLE => "최대 농축배수 도달",
        TENDENCY_CORROSIVE => "부식성",
        TENDENCY_BALANCED => "평형",
        TENDENCY_MILD_SCALING => "약한 스케일",
        TENDENCY_SCALING => "스케일",
        TENDENCY_HEAVY_SCALE => "심한 스케일",
        TENDENCY_LIGHT_SCALE => "약한 스케일",
        TENDENCY_STABLE => "안정",
        INDEX_NOT_APPLICABLE => "해당 없음 (Ca 경도 또는 알칼리도 0)",
        BALANCE_EVAPORATION => "증발량",
        BALANCE_WINDAGE => "비산 손실",
        BALANCE_TOTAL_BLOWDOWN => "필요 블로다운(전체)",
        BALANCE_CONTROLLED_BLOWDOWN => "제어 블로다운",
        BALANCE_LIQUID_LOSS => "액상 손실 합계",
        BALANCE_MAKEUP => "보충수량",
        BALANCE_RETENTION => "체류시간",
        BALANCE_HALF_LIFE => "반감기(HTI)",
        HISTORY_HEADER => "배수     pH     LSI     RSI    SiO2     Ca×SO4   비고",
        NO_WARNINGS => "없음",
        _ => "[missing translation]",
    }
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        REPORT_TITLE => "=== Cooling Tower Cycles of Concentration Report ===",
        PROJECT_CLIENT => "Client",
        PROJECT_LOCATION => "Location",
        PROJECT_SYSTEM_ID => "System ID",
        PROJECT_DATE => "Date",
        SECTION_DESIGN => "\n-- Design --",
        SECTION_WATER => "\n-- Water (makeup / at max cycles) --",
        SECTION_RESULT => "\n-- Concentration limit --",
        SECTION_INDICES => "\n-- Indices at max cycles (skin temperature) --",
        SECTION_BALANCE => "\n-- Water balance --",
        SECTION_HISTORY => "\n-- Step history --",
        SECTION_WARNINGS => "\n-- Warnings --",
        DESIGN_CIRCULATION => "Recirculation rate",
        DESIGN_DELTA_T => "Delta T",
        DESIGN_BASIN_TEMP => "Basin temperature",
        DESIGN_SKIN_TEMP => "Skin temperature",
        DESIGN_LOAD => "Heat load",
        DESIGN_VOLUME => "System volume",
        DESIGN_PROCESS_LOSS => "Process loss",
        DESIGN_PH_MODE => "pH model",
        PH_MODE_NATURAL => "natural concentration",
        PH_MODE_ACID => "acid feed, target pH",
        WATER_HEADER => "Parameter",
        RESULT_MAX_CYCLE => "Maximum cycles",
        RESULT_STOP_REASON => "Stop reason",
        RESULT_LIMIT_AT => "Violated at",
        RESULT_HYDRAULIC_CEILING => "Hydraulic ceiling",
        RESULT_STEPS => "Steps evaluated",
        STOP_HYDRAULIC => "Hydraulic Limit",
        STOP_SILICA => "Silica Limit",
        STOP_LSI => "LSI Limit",
        STOP_GYPSUM => "Gypsum Risk",
        STOP_CA_PO4 => "Calcium-Phosphate Risk",
        STOP_MG_SILICATE => "Magnesium Silicate Risk",
        STOP_MAX_CYCLE => "Maximum Cycle Ceiling Reached",
        TENDENCY_CORROSIVE => "corrosive",
        TENDENCY_BALANCED => "balanced",
        TENDENCY_MILD_SCALING => "mild scaling",
        TENDENCY_SCALING => "scaling",
        TENDENCY_HEAVY_SCALE => "heavy scale",
        TENDENCY_LIGHT_SCALE => "light scale",
        TENDENCY_STABLE => "stable",
        INDEX_NOT_APPLICABLE => "n/a (zero Ca hardness or alkalinity)",
        BALANCE_EVAPORATION => "Evaporation",
        BALANCE_WINDAGE => "Windage",
        BALANCE_TOTAL_BLOWDOWN => "Blowdown needed (total)",
        BALANCE_CONTROLLED_BLOWDOWN => "Controlled blowdown",
        BALANCE_LIQUID_LOSS => "Total liquid loss",
        BALANCE_MAKEUP => "Makeup",
        BALANCE_RETENTION => "Retention time",
        BALANCE_HALF_LIFE => "Half-life (HTI)",
        HISTORY_HEADER => "Cycle    pH     LSI     RSI    SiO2     Ca×SO4   Note",
        NO_WARNINGS => "none",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_falls_back_to_korean_for_unknown_keys() {
        let tr = Translator::new("en-us");
        assert_eq!(tr.language(), Language::En);
        assert_eq!(tr.t(keys::STOP_LSI), "LSI Limit");
        assert_eq!(tr.t("no.such.key"), "[missing translation]");
    }

    #[test]
    fn explicit_language_wins_over_config() {
        assert_eq!(resolve_language("ko-KR", Some("en")), "ko");
        assert_eq!(resolve_language("auto", Some("en")), "en");
    }

    #[test]
    fn nested_pack_keys_are_flattened() {
        let map = parse_toml_to_map("[stop]\nlsi = \"LSI-Grenze\"\n").expect("map");
        assert_eq!(map.get("stop.lsi").map(String::as_str), Some("LSI-Grenze"));
    }
}

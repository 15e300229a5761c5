//! Literal text of the rendered report.
//!
//! Every user-visible string lives here so the wording can change
//! without touching the aggregation or layout code. The report is
//! written in Japanese, matching the documents it is used on.

/// Horizontal rule between report sections.
pub const RULE: &str = "============================================================";

/// Title of the statistics half of the report.
pub const ANALYSIS_TITLE: &str = "会社FMTテンプレート分析結果";

/// Title of the per-slide half of the report.
pub const DETAIL_TITLE: &str = "代表スライドのレイアウト分析";

pub const SLIDE_COUNT: &str = "■ スライド数";

pub const SLIDE_SIZE: &str = "■ スライドサイズ:";

pub const SLIDE_WIDTH: &str = "幅";

pub const SLIDE_HEIGHT: &str = "高さ";

pub const INCHES: &str = "inches";

pub const FONT_USAGE: &str = "■ 使用フォント（出現回数順）:";

pub const FONT_SIZE_USAGE: &str = "■ 使用フォントサイズ（出現回数順）:";

pub const COLOR_USAGE: &str = "■ 使用カラー（出現回数順）:";

pub const MASTER_COUNT: &str = "■ スライドマスタ数";

pub const MASTER: &str = "マスタ";

pub const LAYOUT_COUNT: &str = "レイアウト数";

pub const SLIDE: &str = "■ スライド";

/// Counter suffix on frequency lines, as in `Arial: 3回`.
pub const OCCURRENCES: &str = "回";

pub const TEXT_FIELD: &str = "Text";

pub const FONT_FIELD: &str = "Font";

pub const BOLD_FIELD: &str = "Bold";

/// Placeholder for font attributes a run leaves unset.
pub const INHERIT: &str = "inherit";

/// Printed bold state when a run sets neither bold nor regular.
pub const BOLD_UNSET: &str = "unset";

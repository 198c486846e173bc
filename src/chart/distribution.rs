use serde::{Deserialize, Serialize};

/// Label used when a category arrives without a usable name.
pub const UNNAMED_CATEGORY: &str = "unnamed";

// (primary, secondary) gradient endpoints, assigned by position
const PALETTE: [(&str, &str); 8] = [
    ("#6366f1", "#8b5cf6"),
    ("#06b6d4", "#3b82f6"),
    ("#10b981", "#14b8a6"),
    ("#f59e0b", "#f97316"),
    ("#ec4899", "#f43f5e"),
    ("#84cc16", "#22c55e"),
    ("#a855f7", "#d946ef"),
    ("#0ea5e9", "#6366f1"),
];

const ICONS: [&str; 8] = ["📚", "💻", "🔧", "🎨", "🚀", "🧠", "📝", "🔬"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub name: String,
    pub count: u64,
}

impl CategoryRecord {
    pub fn new(name: impl Into<String>, count: u64) -> Self {
        Self {
            name: name.into(),
            count,
        }
    }

    /// Builds a record from fields that may be missing in the source data.
    pub fn from_parts(name: Option<&str>, count: Option<u64>) -> Self {
        Self {
            name: display_name(name.unwrap_or_default()),
            count: count.unwrap_or(0),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryDisplayEntry {
    pub name: String,
    pub count: u64,
    pub color_primary: &'static str,
    pub color_secondary: &'static str,
    pub icon: &'static str,
    /// `count / total` as text, e.g. `"75.00%"`
    pub percentage: String,
    /// `count / total` in `[0, 1]`
    pub share: f64,
}

fn display_name(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        UNNAMED_CATEGORY.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Derives chart-ready entries from raw category counts.
///
/// Output order matches input order. Colors and icons cycle by position, so
/// reordering the input changes which category gets which color.
pub fn build_display_entries(records: &[CategoryRecord]) -> Vec<CategoryDisplayEntry> {
    // summed as f64 so CMS-supplied counts can't overflow
    let total = records
        .iter()
        .map(|r| r.count as f64)
        .sum::<f64>()
        .max(1.0);
    records
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let (color_primary, color_secondary) = PALETTE[i % PALETTE.len()];
            let share = r.count as f64 / total;
            CategoryDisplayEntry {
                name: display_name(&r.name),
                count: r.count,
                color_primary,
                color_secondary,
                icon: ICONS[i % ICONS.len()],
                percentage: format!("{:.2}%", share * 100.0),
                share,
            }
        })
        .collect()
}

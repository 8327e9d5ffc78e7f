use super::GradeTable;

/// A legend row: swatch color plus range label
#[derive(Debug, Clone, PartialEq)]
pub struct LegendItem {
    pub color: String,
    pub label: String,
}

/// Static legend, built once from a grade table
#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    pub title: String,
    pub items: Vec<LegendItem>,
}

impl Legend {
    pub fn from_grades(grades: &GradeTable) -> Self {
        let rows = grades.grades();
        let items = rows
            .iter()
            .enumerate()
            .map(|(i, grade)| {
                let label = match rows.get(i + 1) {
                    Some(next) => format!("{}–{}", format_bound(grade.min), format_bound(next.min)),
                    None => format!("{}+", format_bound(grade.min)),
                };
                LegendItem {
                    color: grade.color.clone(),
                    label,
                }
            })
            .collect();

        Self {
            title: "Acres".to_string(),
            items,
        }
    }
}

fn format_bound(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

use crate::domain::Park;

/// Popup content bound to a park marker
#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    pub title: String,
    pub lines: Vec<String>,
}

impl Popup {
    pub fn for_park(park: &Park) -> Self {
        let mut lines = vec![format!("Acres: {}", park.acres)];
        if !park.location.is_empty() {
            lines.push(format!("Location: {}", park.location));
        }

        Self {
            title: park.name.clone(),
            lines,
        }
    }

    /// Plain text rendering, one line per row
    pub fn text(&self) -> String {
        let mut text = self.title.clone();
        for line in &self.lines {
            text.push('\n');
            text.push_str(line);
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_popup_text() {
        let park = Park::new("Tyson Park", 26.4, "2351 Kingston Pike", 35.96, -83.92);
        let popup = Popup::for_park(&park);
        assert_eq!(
            popup.text(),
            "Tyson Park\nAcres: 26.4\nLocation: 2351 Kingston Pike"
        );
    }

    #[test]
    fn test_popup_without_location() {
        let park = Park::new("Pocket Park", 0.0, "", 35.96, -83.92);
        assert_eq!(Popup::for_park(&park).text(), "Pocket Park\nAcres: 0");
    }
}

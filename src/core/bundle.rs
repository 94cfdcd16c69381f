//! Flat section-name -> content payload used to fill a report template.

use crate::chart::RenderedChart;
use crate::errors::AppResult;

/// Tabular view of the sessions, already rendered to text cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Section {
    Text(String),
    /// Base64-encoded PNG with a caption.
    Image { caption: String, png_base64: String },
    Lines(Vec<String>),
    Table(SessionTable),
}

impl Section {
    pub fn image(caption: &str, chart: &RenderedChart) -> AppResult<Self> {
        Ok(Section::Image {
            caption: caption.to_string(),
            png_base64: chart.to_base64()?,
        })
    }
}

/// Ordered mapping; inserting an existing name replaces its content in place.
#[derive(Debug, Clone, Default)]
pub struct ReportBundle {
    pub title: String,
    sections: Vec<(String, Section)>,
}

impl ReportBundle {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            sections: Vec::new(),
        }
    }

    pub fn insert(&mut self, name: &str, section: Section) {
        match self.sections.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = section,
            None => self.sections.push((name.to_string(), section)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|(n, _)| n == name).map(|(_, s)| s)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        match self.get(name)? {
            Section::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Section)> {
        self.sections.iter().map(|(n, s)| (n.as_str(), s))
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

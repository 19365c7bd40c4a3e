use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Items per bubble row.
pub const BUBBLE_COLUMN_COUNT: usize = 2;

/// Sizes and spacings used to lay out the marker bubble.
///
/// Text widths are estimated as `chars * font_size * glyph_width_ratio`.
/// Hosts with real font metrics can override the ratios.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BubbleMetrics {
    pub horizontal_padding_px: f64,
    pub vertical_padding_px: f64,
    pub item_inner_spacing_px: f64,
    pub vertical_spacing_px: f64,
    pub horizontal_margin_px: f64,
    pub title_font_px: f64,
    pub value_font_px: f64,
    pub label_font_px: f64,
    pub glyph_width_ratio: f64,
    pub text_height_ratio: f64,
    /// Default bubble offset from the marker, as a fraction of the bubble width.
    pub default_offset_ratio: f64,
}

impl Default for BubbleMetrics {
    fn default() -> Self {
        Self {
            horizontal_padding_px: 12.0,
            vertical_padding_px: 10.0,
            item_inner_spacing_px: 2.0,
            vertical_spacing_px: 16.0,
            horizontal_margin_px: 8.0,
            title_font_px: 13.0,
            value_font_px: 17.0,
            label_font_px: 12.0,
            glyph_width_ratio: 0.55,
            text_height_ratio: 0.8,
            default_offset_ratio: -0.2,
        }
    }
}

impl BubbleMetrics {
    pub fn validate(self) -> ChartResult<Self> {
        let fields = [
            ("horizontal_padding_px", self.horizontal_padding_px),
            ("vertical_padding_px", self.vertical_padding_px),
            ("item_inner_spacing_px", self.item_inner_spacing_px),
            ("vertical_spacing_px", self.vertical_spacing_px),
            ("horizontal_margin_px", self.horizontal_margin_px),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "bubble `{name}` must be finite and >= 0"
                )));
            }
        }
        for (name, value) in [
            ("title_font_px", self.title_font_px),
            ("value_font_px", self.value_font_px),
            ("label_font_px", self.label_font_px),
            ("glyph_width_ratio", self.glyph_width_ratio),
            ("text_height_ratio", self.text_height_ratio),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "bubble `{name}` must be finite and > 0"
                )));
            }
        }
        if !self.default_offset_ratio.is_finite() {
            return Err(ChartError::InvalidData(
                "bubble offset ratio must be finite".to_owned(),
            ));
        }
        Ok(self)
    }

    #[must_use]
    pub fn text_width(&self, text: &str, font_px: f64) -> f64 {
        text.chars().count() as f64 * font_px * self.glyph_width_ratio
    }

    #[must_use]
    pub fn text_height(&self, font_px: f64) -> f64 {
        font_px * self.text_height_ratio
    }

    /// Sizes the bubble and positions every text item relative to its top-left corner.
    #[must_use]
    pub fn layout(&self, content: &BubbleContent) -> BubbleLayout {
        let title_height = self.text_height(self.title_font_px);
        let value_height = self.text_height(self.value_font_px);
        let label_height = self.text_height(self.label_font_px);
        let item_height = value_height + self.item_inner_spacing_px + label_height;

        let mut column_widths = [0.0f64; BUBBLE_COLUMN_COUNT];
        for (i, entry) in content.entries.iter().enumerate() {
            let width = self
                .text_width(&entry.value, self.value_font_px)
                .max(self.text_width(&entry.label, self.label_font_px));
            let column = i % BUBBLE_COLUMN_COUNT;
            column_widths[column] = column_widths[column].max(width);
        }

        let item_count = content.entries.len();
        let used_columns = item_count.min(BUBBLE_COLUMN_COUNT);
        let row_count = item_count.div_ceil(BUBBLE_COLUMN_COUNT);
        let columns_width = column_widths.iter().sum::<f64>()
            + used_columns.saturating_sub(1) as f64 * self.horizontal_padding_px;
        let title_width = self.text_width(&content.title, self.title_font_px);

        let width = 2.0 * self.horizontal_padding_px + columns_width.max(title_width);
        let height = 2.0 * self.vertical_padding_px
            + title_height
            + self.vertical_spacing_px
            + row_count as f64 * item_height
            + row_count.saturating_sub(1) as f64 * self.vertical_spacing_px;

        let items_top = self.vertical_padding_px + title_height + self.vertical_spacing_px;
        let items = (0..item_count)
            .map(|i| {
                let column = i % BUBBLE_COLUMN_COUNT;
                let row = i / BUBBLE_COLUMN_COUNT;
                let dx = self.horizontal_padding_px
                    + column_widths[..column]
                        .iter()
                        .map(|width| width + self.horizontal_padding_px)
                        .sum::<f64>();
                let top = items_top + row as f64 * (item_height + self.vertical_spacing_px);
                BubbleItemLayout {
                    dx,
                    value_baseline: top + value_height,
                    label_baseline: top + value_height + self.item_inner_spacing_px + label_height,
                }
            })
            .collect();

        BubbleLayout {
            width,
            height,
            title_dx: self.horizontal_padding_px,
            title_baseline: self.vertical_padding_px + title_height,
            items,
        }
    }
}

/// One checked line inside the bubble.
#[derive(Debug, Clone, PartialEq)]
pub struct BubbleEntry {
    pub label: String,
    pub value: String,
    pub color: Color,
}

/// Formatted bubble text for the marker's current index.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BubbleContent {
    pub title: String,
    pub entries: Vec<BubbleEntry>,
}

/// Offsets of one entry's texts from the bubble's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BubbleItemLayout {
    pub dx: f64,
    pub value_baseline: f64,
    pub label_baseline: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BubbleLayout {
    pub width: f64,
    pub height: f64,
    pub title_dx: f64,
    pub title_baseline: f64,
    pub items: Vec<BubbleItemLayout>,
}

#[cfg(test)]
mod tests {
    use super::{BubbleContent, BubbleEntry, BubbleMetrics};
    use crate::render::Color;

    fn entry(label: &str, value: &str) -> BubbleEntry {
        BubbleEntry {
            label: label.to_owned(),
            value: value.to_owned(),
            color: Color::rgb(0.0, 0.0, 0.0),
        }
    }

    #[test]
    fn three_entries_wrap_into_two_rows() {
        let metrics = BubbleMetrics::default();
        let content = BubbleContent {
            title: "Sat, Feb 24".to_owned(),
            entries: vec![entry("#0", "10"), entry("#1", "20"), entry("#2", "30")],
        };
        let layout = metrics.layout(&content);
        assert_eq!(layout.items.len(), 3);
        assert_eq!(layout.items[2].dx, layout.items[0].dx);
        assert!(layout.items[2].value_baseline > layout.items[0].label_baseline);
        assert!(layout.items[1].dx > layout.items[0].dx);
        assert!(layout.width >= 2.0 * metrics.horizontal_padding_px);
    }
}

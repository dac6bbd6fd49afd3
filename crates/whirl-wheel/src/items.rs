/// Label shown when the wheel has no data yet.
pub const NO_DATA_LABEL: &str = "no data";

/// Item labels with blank padding slots on both ends.
///
/// The padding lets the first and last real items sit at the wheel's
/// center while the slots beyond them still have something to project.
/// An empty source list is coerced to a single [`NO_DATA_LABEL`] entry
/// rather than rejected.
#[derive(Clone, Debug, PartialEq)]
pub struct ItemTable {
    labels: Vec<String>,
    pad: usize,
}

impl ItemTable {
    /// Builds the padded table with `pad` blank slots front and back.
    pub fn from_labels(labels: Vec<String>, pad: usize) -> Self {
        let data = if labels.is_empty() {
            vec![NO_DATA_LABEL.to_string()]
        } else {
            labels
        };

        let mut padded = Vec::with_capacity(data.len() + 2 * pad);
        padded.extend(std::iter::repeat_with(String::new).take(pad));
        padded.extend(data);
        padded.extend(std::iter::repeat_with(String::new).take(pad));
        Self {
            labels: padded,
            pad,
        }
    }

    /// Number of real (caller-supplied or coerced) items.
    pub fn unpadded_len(&self) -> usize {
        self.labels.len() - 2 * self.pad
    }

    pub fn padded_len(&self) -> usize {
        self.labels.len()
    }

    pub fn pad(&self) -> usize {
        self.pad
    }

    /// Label of the item centered when item `index` is selected.
    pub fn center_label(&self, index: usize) -> &str {
        self.labels
            .get(index + self.pad)
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Raw padded-slot lookup for renderers walking the visible window.
    /// Out-of-range positions clamp to the nearest end slot.
    pub fn label_at(&self, padded_index: isize) -> &str {
        let clamped = padded_index.clamp(0, self.labels.len() as isize - 1) as usize;
        &self.labels[clamped]
    }
}

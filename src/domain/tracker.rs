/// Highlighted position within a result list.
///
/// The index is always interpreted against the length passed in; it never
/// wraps and is pulled back into range whenever the list shrinks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActiveItem {
    index: usize,
}

impl ActiveItem {
    pub fn new(index: usize, len: usize) -> Self {
        Self { index }.clamp(len)
    }

    pub fn index(self) -> usize {
        self.index
    }

    pub fn clamp(self, len: usize) -> Self {
        Self {
            index: clamp_index(self.index, len),
        }
    }

    pub fn next(self, len: usize) -> Self {
        Self {
            index: clamp_index(self.index.saturating_add(1), len),
        }
    }

    pub fn previous(self, len: usize) -> Self {
        Self {
            index: clamp_index(self.index.saturating_sub(1), len),
        }
    }
}

pub fn clamp_index(index: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        index.min(len - 1)
    }
}

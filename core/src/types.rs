/// Card identifier, assigned at deck generation and stable for the whole game.
pub type CardId = u16;

/// Completed-turn counter.
pub type MoveCount = u32;

/// Star rating, always within `1..=3`.
pub type StarCount = u8;

/// Distinguishes successive games so deferred tasks of an earlier game can be discarded.
pub type Generation = u32;

pub trait ToIndex {
    fn to_index(self) -> usize;
}

impl ToIndex for CardId {
    fn to_index(self) -> usize {
        self.into()
    }
}

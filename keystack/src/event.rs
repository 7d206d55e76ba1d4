/// A key press or release at a matrix position, as produced by the matrix scan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyEvent {
    pub row: u8,
    pub col: u8,
    pub pressed: bool,
    /// Scan time of the event, in milliseconds
    pub timestamp: u64,
}

impl KeyEvent {
    pub const fn press(row: u8, col: u8, timestamp: u64) -> Self {
        Self {
            row,
            col,
            pressed: true,
            timestamp,
        }
    }

    pub const fn release(row: u8, col: u8, timestamp: u64) -> Self {
        Self {
            row,
            col,
            pressed: false,
            timestamp,
        }
    }
}

use embedded_storage::nor_flash::{ErrorType, NorFlashError, NorFlashErrorKind};

/// Errors of [`RamFlash`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RamFlashError {
    OutOfBounds,
    NotAligned,
}

impl NorFlashError for RamFlashError {
    fn kind(&self) -> NorFlashErrorKind {
        match self {
            RamFlashError::OutOfBounds => NorFlashErrorKind::OutOfBounds,
            RamFlashError::NotAligned => NorFlashErrorKind::NotAligned,
        }
    }
}

/// A NOR flash kept in RAM, for hosts and tests.
///
/// Writes can only clear bits, like a real NOR flash. The whole content is
/// available as an image, so a host can keep it across runs to emulate power cycles.
pub struct RamFlash<const SIZE: usize> {
    data: [u8; SIZE],
}

impl<const SIZE: usize> Default for RamFlash<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const SIZE: usize> RamFlash<SIZE> {
    pub const SECTOR_SIZE: usize = 1024;

    /// A fully erased flash
    pub fn new() -> Self {
        Self { data: [0xFF; SIZE] }
    }

    /// Restore a flash from a saved image, the image must be exactly `SIZE` bytes
    pub fn from_image(image: &[u8]) -> Result<Self, RamFlashError> {
        if image.len() != SIZE {
            return Err(RamFlashError::OutOfBounds);
        }
        let mut flash = Self::new();
        flash.data.copy_from_slice(image);
        Ok(flash)
    }

    /// The current content of the flash
    pub fn image(&self) -> &[u8] {
        &self.data
    }

    fn range(&self, offset: u32, len: usize) -> Result<core::ops::Range<usize>, RamFlashError> {
        let start = offset as usize;
        let end = start.checked_add(len).ok_or(RamFlashError::OutOfBounds)?;
        if end > SIZE {
            return Err(RamFlashError::OutOfBounds);
        }
        Ok(start..end)
    }

    fn do_erase(&mut self, from: u32, to: u32) -> Result<(), RamFlashError> {
        if from > to {
            return Err(RamFlashError::OutOfBounds);
        }
        if from as usize % Self::SECTOR_SIZE != 0 || to as usize % Self::SECTOR_SIZE != 0 {
            return Err(RamFlashError::NotAligned);
        }
        let range = self.range(from, (to - from) as usize)?;
        self.data[range].fill(0xFF);
        Ok(())
    }

    fn do_write(&mut self, offset: u32, bytes: &[u8]) -> Result<(), RamFlashError> {
        if offset as usize % 4 != 0 || bytes.len() % 4 != 0 {
            return Err(RamFlashError::NotAligned);
        }
        let range = self.range(offset, bytes.len())?;
        for (cell, byte) in self.data[range].iter_mut().zip(bytes) {
            *cell &= *byte;
        }
        Ok(())
    }

    fn do_read(&self, offset: u32, bytes: &mut [u8]) -> Result<(), RamFlashError> {
        let range = self.range(offset, bytes.len())?;
        bytes.copy_from_slice(&self.data[range]);
        Ok(())
    }
}

impl<const SIZE: usize> ErrorType for RamFlash<SIZE> {
    type Error = RamFlashError;
}

impl<const SIZE: usize> embedded_storage::nor_flash::ReadNorFlash for RamFlash<SIZE> {
    const READ_SIZE: usize = 1;

    fn read(&mut self, offset: u32, bytes: &mut [u8]) -> Result<(), Self::Error> {
        self.do_read(offset, bytes)
    }

    fn capacity(&self) -> usize {
        SIZE
    }
}

impl<const SIZE: usize> embedded_storage::nor_flash::NorFlash for RamFlash<SIZE> {
    const WRITE_SIZE: usize = 4;
    const ERASE_SIZE: usize = RamFlash::<SIZE>::SECTOR_SIZE;

    fn erase(&mut self, from: u32, to: u32) -> Result<(), Self::Error> {
        self.do_erase(from, to)
    }

    fn write(&mut self, offset: u32, bytes: &[u8]) -> Result<(), Self::Error> {
        self.do_write(offset, bytes)
    }
}

impl<const SIZE: usize> embedded_storage_async::nor_flash::ReadNorFlash for RamFlash<SIZE> {
    const READ_SIZE: usize = 1;

    async fn read(&mut self, offset: u32, bytes: &mut [u8]) -> Result<(), Self::Error> {
        self.do_read(offset, bytes)
    }

    fn capacity(&self) -> usize {
        SIZE
    }
}

impl<const SIZE: usize> embedded_storage_async::nor_flash::NorFlash for RamFlash<SIZE> {
    const WRITE_SIZE: usize = 4;
    const ERASE_SIZE: usize = RamFlash::<SIZE>::SECTOR_SIZE;

    async fn erase(&mut self, from: u32, to: u32) -> Result<(), Self::Error> {
        self.do_erase(from, to)
    }

    async fn write(&mut self, offset: u32, bytes: &[u8]) -> Result<(), Self::Error> {
        self.do_write(offset, bytes)
    }
}

#[cfg(test)]
mod tests {
    use embedded_storage::nor_flash::{NorFlash, ReadNorFlash};

    use super::*;

    #[test]
    fn test_write_only_clears_bits() {
        let mut flash = RamFlash::<2048>::new();
        NorFlash::write(&mut flash, 0, &[0b1010_1010, 0, 0xFF, 0x0F]).unwrap();
        NorFlash::write(&mut flash, 0, &[0b0110_0110, 0xFF, 0xFF, 0xF0]).unwrap();
        let mut buf = [0u8; 4];
        ReadNorFlash::read(&mut flash, 0, &mut buf).unwrap();
        assert_eq!(buf, [0b0010_0010, 0, 0xFF, 0]);

        NorFlash::erase(&mut flash, 0, 1024).unwrap();
        ReadNorFlash::read(&mut flash, 0, &mut buf).unwrap();
        assert_eq!(buf, [0xFF; 4]);
    }

    #[test]
    fn test_alignment_and_bounds() {
        let mut flash = RamFlash::<2048>::new();
        assert_eq!(NorFlash::write(&mut flash, 2, &[0; 4]), Err(RamFlashError::NotAligned));
        assert_eq!(NorFlash::erase(&mut flash, 0, 100), Err(RamFlashError::NotAligned));
        assert_eq!(NorFlash::write(&mut flash, 2048, &[0; 4]), Err(RamFlashError::OutOfBounds));
        assert_eq!(NorFlash::erase(&mut flash, 1024, 3072), Err(RamFlashError::OutOfBounds));
    }

    #[test]
    fn test_image_round_trip() {
        let mut flash = RamFlash::<2048>::new();
        NorFlash::write(&mut flash, 8, &[1, 2, 3, 4]).unwrap();
        let restored = RamFlash::<2048>::from_image(flash.image()).unwrap();
        assert_eq!(restored.image(), flash.image());
        assert!(RamFlash::<2048>::from_image(&[0; 16]).is_err());
    }
}

//! crates/logging/src/levels.rs
//! Flag enums and level structures for info and debug verbosity.

/// Info flags for diagnostic categories.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InfoFlag {
    /// Entries removed by the deletion pipeline.
    Del,
    /// Miscellaneous operations.
    Misc,
    /// Tree traversal progress.
    Walk,
}

/// Debug flags for diagnostic categories.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DebugFlag {
    /// Resource release on terminal paths.
    Close,
    /// Deletion attempts and failures.
    Del,
    /// Character set decoding.
    Iconv,
    /// Line reads and demand accounting.
    Io,
    /// Directory listing and expansion.
    Walk,
}

/// Info verbosity levels for each flag.
#[derive(Clone, Default, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InfoLevels {
    /// Deletion level.
    pub del: u8,
    /// Miscellaneous operations level.
    pub misc: u8,
    /// Traversal level.
    pub walk: u8,
}

impl InfoLevels {
    /// Get the level for a specific flag.
    pub fn get(&self, flag: InfoFlag) -> u8 {
        match flag {
            InfoFlag::Del => self.del,
            InfoFlag::Misc => self.misc,
            InfoFlag::Walk => self.walk,
        }
    }

    /// Set the level for a specific flag.
    pub fn set(&mut self, flag: InfoFlag, level: u8) {
        match flag {
            InfoFlag::Del => self.del = level,
            InfoFlag::Misc => self.misc = level,
            InfoFlag::Walk => self.walk = level,
        }
    }

    /// Set all flags to the specified level.
    pub fn set_all(&mut self, level: u8) {
        self.del = level;
        self.misc = level;
        self.walk = level;
    }
}

/// Debug verbosity levels for each flag.
#[derive(Clone, Default, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DebugLevels {
    /// Resource release level.
    pub close: u8,
    /// Deletion level.
    pub del: u8,
    /// Character set decoding level.
    pub iconv: u8,
    /// Line read level.
    pub io: u8,
    /// Directory listing level.
    pub walk: u8,
}

impl DebugLevels {
    /// Get the level for a specific flag.
    pub fn get(&self, flag: DebugFlag) -> u8 {
        match flag {
            DebugFlag::Close => self.close,
            DebugFlag::Del => self.del,
            DebugFlag::Iconv => self.iconv,
            DebugFlag::Io => self.io,
            DebugFlag::Walk => self.walk,
        }
    }

    /// Set the level for a specific flag.
    pub fn set(&mut self, flag: DebugFlag, level: u8) {
        match flag {
            DebugFlag::Close => self.close = level,
            DebugFlag::Del => self.del = level,
            DebugFlag::Iconv => self.iconv = level,
            DebugFlag::Io => self.io = level,
            DebugFlag::Walk => self.walk = level,
        }
    }

    /// Set all flags to the specified level.
    pub fn set_all(&mut self, level: u8) {
        self.close = level;
        self.del = level;
        self.iconv = level;
        self.io = level;
        self.walk = level;
    }
}

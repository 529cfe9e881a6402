//! crates/logging/src/config.rs
//! Verbosity configuration combining info and debug levels.

use super::levels::{DebugFlag, DebugLevels, InfoFlag, InfoLevels};

/// Combined verbosity configuration for info and debug flags.
#[derive(Clone, Default, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VerbosityConfig {
    /// Info flag levels.
    pub info: InfoLevels,
    /// Debug flag levels.
    pub debug: DebugLevels,
}

impl VerbosityConfig {
    /// Create a new configuration from a verbose level (0-3).
    ///
    /// Levels above 3 behave like 3.
    pub fn from_verbose_level(level: u8) -> Self {
        let mut config = Self::default();

        match level {
            0 => {}
            1 => {
                config.info.del = 1;
                config.info.misc = 1;
                config.info.walk = 1;
            }
            2 => {
                config.info.del = 2;
                config.info.misc = 2;
                config.info.walk = 1;
                config.debug.close = 1;
                config.debug.del = 1;
                config.debug.iconv = 1;
                config.debug.walk = 1;
            }
            _ => {
                config.info.del = 2;
                config.info.misc = 2;
                config.info.walk = 2;
                config.debug.close = 2;
                config.debug.del = 2;
                config.debug.iconv = 1;
                config.debug.io = 1;
                config.debug.walk = 2;
            }
        }

        config
    }

    /// Apply a single info flag token (e.g., "del2", "walk").
    pub fn apply_info_flag(&mut self, token: &str) -> Result<(), String> {
        let (name, level) = parse_flag_token(token)?;

        let flag = match name {
            "del" => InfoFlag::Del,
            "misc" => InfoFlag::Misc,
            "walk" => InfoFlag::Walk,
            "all" => {
                self.info.set_all(level);
                return Ok(());
            }
            "none" => {
                self.info.set_all(0);
                return Ok(());
            }
            _ => return Err(format!("unknown info flag: {name}")),
        };

        self.info.set(flag, level);
        Ok(())
    }

    /// Apply a single debug flag token (e.g., "io2", "close").
    pub fn apply_debug_flag(&mut self, token: &str) -> Result<(), String> {
        let (name, level) = parse_flag_token(token)?;

        let flag = match name {
            "close" => DebugFlag::Close,
            "del" => DebugFlag::Del,
            "iconv" => DebugFlag::Iconv,
            "io" => DebugFlag::Io,
            "walk" => DebugFlag::Walk,
            "all" => {
                self.debug.set_all(level);
                return Ok(());
            }
            "none" => {
                self.debug.set_all(0);
                return Ok(());
            }
            _ => return Err(format!("unknown debug flag: {name}")),
        };

        self.debug.set(flag, level);
        Ok(())
    }

    /// Apply a comma-separated list of info tokens, stopping at the first bad one.
    pub fn apply_info_flags(&mut self, tokens: &str) -> Result<(), String> {
        for token in tokens.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            self.apply_info_flag(token)?;
        }
        Ok(())
    }

    /// Apply a comma-separated list of debug tokens, stopping at the first bad one.
    pub fn apply_debug_flags(&mut self, tokens: &str) -> Result<(), String> {
        for token in tokens.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            self.apply_debug_flag(token)?;
        }
        Ok(())
    }
}

/// Parse a flag token like "del2" into ("del", 2) or "walk" into ("walk", 1).
fn parse_flag_token(token: &str) -> Result<(&str, u8), String> {
    if token.is_empty() {
        return Err("empty flag token".to_string());
    }

    let digit_start = token.find(|c: char| c.is_ascii_digit());

    match digit_start {
        Some(0) => Err(format!("missing flag name in: {token}")),
        Some(pos) => {
            let name = &token[..pos];
            let level_str = &token[pos..];
            let level = level_str
                .parse::<u8>()
                .map_err(|_| format!("invalid level in flag: {token}"))?;
            Ok((name, level))
        }
        None => Ok((token, 1)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_verbose_level_0() {
        let config = VerbosityConfig::from_verbose_level(0);
        assert_eq!(config.info.del, 0);
        assert_eq!(config.info.walk, 0);
        assert_eq!(config.debug.io, 0);
    }

    #[test]
    fn test_from_verbose_level_1() {
        let config = VerbosityConfig::from_verbose_level(1);

        assert_eq!(config.info.del, 1);
        assert_eq!(config.info.misc, 1);
        assert_eq!(config.info.walk, 1);
        assert_eq!(config.debug.del, 0);
        assert_eq!(config.debug.close, 0);
    }

    #[test]
    fn test_from_verbose_level_2() {
        let config = VerbosityConfig::from_verbose_level(2);

        assert_eq!(config.info.del, 2);
        assert_eq!(config.debug.close, 1);
        assert_eq!(config.debug.del, 1);
        assert_eq!(config.debug.iconv, 1);
        assert_eq!(config.debug.walk, 1);
        assert_eq!(config.debug.io, 0);
    }

    #[test]
    fn test_from_verbose_level_saturates_at_3() {
        let three = VerbosityConfig::from_verbose_level(3);
        let nine = VerbosityConfig::from_verbose_level(9);

        assert_eq!(three.debug.io, 1);
        assert_eq!(three.debug.walk, 2);
        assert_eq!(nine.debug.io, three.debug.io);
        assert_eq!(nine.info.walk, three.info.walk);
    }

    #[test]
    fn test_parse_flag_token() {
        assert_eq!(parse_flag_token("del").unwrap(), ("del", 1));
        assert_eq!(parse_flag_token("del2").unwrap(), ("del", 2));
        assert_eq!(parse_flag_token("walk10").unwrap(), ("walk", 10));
        assert!(parse_flag_token("").is_err());
        assert!(parse_flag_token("3").is_err());
        assert!(parse_flag_token("io999").is_err());
    }

    #[test]
    fn test_apply_info_flag() {
        let mut config = VerbosityConfig::default();

        config.apply_info_flag("del").unwrap();
        assert_eq!(config.info.del, 1);

        config.apply_info_flag("del2").unwrap();
        assert_eq!(config.info.del, 2);

        assert!(config.apply_info_flag("copy").is_err());
    }

    #[test]
    fn test_apply_debug_flag() {
        let mut config = VerbosityConfig::default();

        config.apply_debug_flag("io").unwrap();
        assert_eq!(config.debug.io, 1);

        config.apply_debug_flag("close3").unwrap();
        assert_eq!(config.debug.close, 3);

        assert!(config.apply_debug_flag("recv").is_err());
    }

    #[test]
    fn test_all_and_none_tokens() {
        let mut config = VerbosityConfig::default();

        config.apply_debug_flag("all2").unwrap();
        assert_eq!(config.debug.iconv, 2);
        assert_eq!(config.debug.walk, 2);

        config.apply_debug_flag("none").unwrap();
        assert_eq!(config.debug.iconv, 0);

        config.apply_info_flag("all").unwrap();
        assert_eq!(config.info.misc, 1);
    }

    #[test]
    fn test_apply_flag_lists() {
        let mut config = VerbosityConfig::default();
        config.apply_debug_flags("io2, walk,close").unwrap();
        assert_eq!(config.debug.io, 2);
        assert_eq!(config.debug.walk, 1);
        assert_eq!(config.debug.close, 1);

        let error = config.apply_info_flags("del,bogus,walk").unwrap_err();
        assert!(error.contains("bogus"));
        assert_eq!(config.info.del, 1);
        assert_eq!(config.info.walk, 0);
    }
}

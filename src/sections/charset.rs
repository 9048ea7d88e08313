//! Character classes and effective alphabet size.

/// Which character classes a password draws from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CharClasses {
    pub lower: bool,
    pub upper: bool,
    pub digit: bool,
    /// Anything that is neither ASCII alphanumeric nor whitespace.
    pub symbol: bool,
    pub whitespace: bool,
}

impl CharClasses {
    pub fn of(password: &str) -> Self {
        let mut classes = Self::default();
        for c in password.chars() {
            if c.is_ascii_lowercase() {
                classes.lower = true;
            } else if c.is_ascii_uppercase() {
                classes.upper = true;
            } else if c.is_ascii_digit() {
                classes.digit = true;
            } else if c.is_whitespace() {
                classes.whitespace = true;
            } else {
                classes.symbol = true;
            }
        }
        classes
    }

    /// Count of {lower, upper, digit, symbol} present.
    pub fn variety(&self) -> usize {
        [self.lower, self.upper, self.digit, self.symbol]
            .iter()
            .filter(|&&b| b)
            .count()
    }

    pub fn mixed_case(&self) -> bool {
        self.lower && self.upper
    }

    pub fn size(&self) -> u32 {
        let mut size = 0;
        if self.lower {
            size += 26;
        }
        if self.upper {
            size += 26;
        }
        if self.digit {
            size += 10;
        }
        if self.symbol {
            size += 33;
        }
        if self.whitespace {
            size += 1;
        }
        size
    }
}

/// Effective alphabet size implied by the classes present; `0` when empty.
pub fn charset_size(password: &str) -> u32 {
    CharClasses::of(password).size()
}

//! Character classes a password can draw from, each backed by a fixed
//! ASCII alphabet.

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CharacterClass {
    Digits,
    Symbols,
    Uppercase,
    Lowercase,
}

impl CharacterClass {
    pub const ALL: [Self; 4] = [Self::Digits, Self::Symbols, Self::Uppercase, Self::Lowercase];

    pub const fn alphabet(self) -> &'static [u8] {
        match self {
            Self::Digits => b"0123456789",
            Self::Symbols => b"!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~",
            Self::Uppercase => b"ABCDEFGHIJKLMNOPQRSTUVWXYZ",
            Self::Lowercase => b"abcdefghijklmnopqrstuvwxyz",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Digits => "digits",
            Self::Symbols => "symbols",
            Self::Uppercase => "uppercase",
            Self::Lowercase => "lowercase",
        }
    }
}

/// Set of enabled character classes. Iteration order is fixed:
/// digits, symbols, uppercase, lowercase.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Selection {
    pub digits: bool,
    pub symbols: bool,
    pub uppercase: bool,
    pub lowercase: bool,
}

impl Selection {
    pub const fn all() -> Self {
        Self {
            digits: true,
            symbols: true,
            uppercase: true,
            lowercase: true,
        }
    }

    pub fn classes(&self) -> impl Iterator<Item = CharacterClass> + '_ {
        CharacterClass::ALL
            .into_iter()
            .filter(move |class| self.contains(*class))
    }

    pub fn contains(&self, class: CharacterClass) -> bool {
        match class {
            CharacterClass::Digits => self.digits,
            CharacterClass::Symbols => self.symbols,
            CharacterClass::Uppercase => self.uppercase,
            CharacterClass::Lowercase => self.lowercase,
        }
    }

    pub fn count(&self) -> usize {
        self.classes().count()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Concatenation of the enabled alphabets, the pool filler
    /// characters are drawn from.
    pub fn pool(&self) -> Vec<u8> {
        self.classes()
            .flat_map(|class| class.alphabet().iter().copied())
            .collect()
    }
}

impl Default for Selection {
    /// Digits, uppercase and lowercase on, symbols off.
    fn default() -> Self {
        Self {
            digits: true,
            symbols: false,
            uppercase: true,
            lowercase: true,
        }
    }
}

use std::{
    fmt,
    ops::{BitOr, BitOrAssign},
};

/// Role flags of a file or type fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct FileSettings(u8);

impl FileSettings {
    pub const NONE: Self = Self(0);
    /// Declares the root plugin class
    pub const PLUGIN: Self = Self(1 << 0);
    /// Marked with `//Define:Framework`
    pub const FRAMEWORK: Self = Self(1 << 1);
    /// Marked with `//Define:ExcludeFile`
    pub const EXCLUDE: Self = Self(1 << 2);
    /// Holds extension methods (`//Define:ExtensionMethods`)
    pub const EXTENSION: Self = Self(1 << 3);

    const NAMES: [(Self, &'static str); 4] = [
        (Self::PLUGIN, "plugin"),
        (Self::FRAMEWORK, "framework"),
        (Self::EXCLUDE, "exclude"),
        (Self::EXTENSION, "extension"),
    ];

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns true if every flag of `other` is set.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    pub const fn is_plugin(self) -> bool {
        self.contains(Self::PLUGIN)
    }

    pub const fn is_framework(self) -> bool {
        self.contains(Self::FRAMEWORK)
    }

    pub const fn is_excluded(self) -> bool {
        self.contains(Self::EXCLUDE)
    }

    pub const fn is_extension(self) -> bool {
        self.contains(Self::EXTENSION)
    }
}

impl BitOr for FileSettings {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for FileSettings {
    fn bitor_assign(&mut self, rhs: Self) {
        self.insert(rhs);
    }
}

impl fmt::Display for FileSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "none");
        }
        let names: Vec<&str> = Self::NAMES
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect();
        write!(f, "{}", names.join("|"))
    }
}

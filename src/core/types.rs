/// Integer identity of a module, packed from its name.
///
/// Each of the first four bytes of the name occupies one byte of the key,
/// lowest byte first. Module names in the network description are short
/// lowercase identifiers, so four bytes keep distinct names distinct. Longer
/// names are truncated: `broadcaster` and `button` become `broa` and `butt`.
/// This is an assumption about the input alphabet, not a general hash; an
/// unconstrained alphabet would need a string interning table instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleKey(u32);

impl ModuleKey {
    /// Number of name bytes packed into a key
    pub const WIDTH: usize = 4;

    /// Key of the entry module
    pub const BROADCASTER: ModuleKey = ModuleKey::from_bytes(b"broadcaster");

    /// Virtual source of every button press
    pub const BUTTON: ModuleKey = ModuleKey::from_bytes(b"button");

    /// Encode a module name
    pub fn encode(name: &str) -> Self {
        Self::from_bytes(name.as_bytes())
    }

    const fn from_bytes(bytes: &[u8]) -> Self {
        let mut key = 0u32;
        let mut i = 0;
        while i < bytes.len() && i < Self::WIDTH {
            key |= (bytes[i] as u32) << (8 * i);
            i += 1;
        }
        ModuleKey(key)
    }

    /// Raw packed value
    pub fn raw(&self) -> u32 {
        self.0
    }

    /// Decode the (possibly truncated) name, for diagnostics only
    pub fn name(&self) -> String {
        self.0
            .to_le_bytes()
            .iter()
            .take_while(|&&b| b != 0)
            .map(|&b| b as char)
            .collect()
    }
}

impl From<&str> for ModuleKey {
    fn from(name: &str) -> Self {
        ModuleKey::encode(name)
    }
}

impl std::fmt::Display for ModuleKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

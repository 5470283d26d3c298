/// What `.git/HEAD` points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitHead {
    Branch(String),
    /// Abbreviated (7 char) commit id
    Detached(String),
    NoRepository,
}

impl GitHead {
    pub fn branch(&self) -> Option<&str> {
        match self {
            GitHead::Branch(b) => Some(b),
            _ => None,
        }
    }

    pub fn short_commit(&self) -> Option<&str> {
        match self {
            GitHead::Detached(c) => Some(c),
            _ => None,
        }
    }
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Not enough skill groups to merge: found {found}, at least {required} are required")]
    NotEnoughGroups { found: usize, required: usize },

    #[error("Unknown category: {0:?}")]
    UnknownCategory(String),

    #[error("Priority {priority} of buff {item:?} is out of range (must be below {max})")]
    PriorityOutOfRange {
        item: String,
        priority: u32,
        max: usize,
    },

    #[error("Duplicate buff name: {0:?}")]
    DuplicateItem(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl CoreError {
    /// Errors raised before any combination is built.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            CoreError::NotEnoughGroups { .. }
                | CoreError::PriorityOutOfRange { .. }
                | CoreError::DuplicateItem(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;

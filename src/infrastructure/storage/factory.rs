//! Storage backend selection

use std::str::FromStr;

/// Supported storage types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageType {
    /// In-memory storage (for testing/development)
    InMemory,
    /// PostgreSQL storage
    Postgres,
}

impl FromStr for StorageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" | "inmemory" | "in-memory" | "in_memory" => Ok(Self::InMemory),
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            other => Err(format!("Unknown storage backend: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_type_from_str() {
        assert_eq!("memory".parse::<StorageType>(), Ok(StorageType::InMemory));
        assert_eq!("in-memory".parse::<StorageType>(), Ok(StorageType::InMemory));
        assert_eq!(" Postgres ".parse::<StorageType>(), Ok(StorageType::Postgres));
        assert_eq!("pg".parse::<StorageType>(), Ok(StorageType::Postgres));
        assert!("redis".parse::<StorageType>().is_err());
    }
}

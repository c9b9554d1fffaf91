mod defaults;

use std::path::Path;

use anyhow::Result;
use tokio::fs;

use crate::error::ValidationError;
use crate::models::Verb;

pub use defaults::DEFAULT_VERBS;

/// Number of cells in a bingo grid, and so the minimum size of a usable pool
pub const GRID_CELLS: usize = 25;

/// A validated verb catalog that grids are drawn from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerbPool {
    verbs: Vec<Verb>,
}

impl VerbPool {
    /// The built-in catalog
    pub fn default_catalog() -> Self {
        Self {
            verbs: DEFAULT_VERBS.clone(),
        }
    }

    /// Load a JSON verb list from a file
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).await?;
        let candidates: Vec<Verb> = serde_json::from_str(&content)?;
        let pool = Self::validate(candidates)?;

        tracing::info!("Loaded {} verbs into the verb pool", pool.len());

        Ok(pool)
    }

    /// Accept an edited verb list. Blank entries are dropped and forms
    /// are trimmed; fewer than 25 remaining entries is a rejection.
    pub fn validate(candidates: Vec<Verb>) -> Result<Self, ValidationError> {
        let verbs: Vec<Verb> = candidates
            .into_iter()
            .filter(Verb::is_complete)
            .map(|verb| Verb {
                present: verb.present.trim().to_string(),
                past: verb.past.trim().to_string(),
                is_regular: verb.is_regular,
            })
            .collect();

        if verbs.len() < GRID_CELLS {
            return Err(ValidationError::TooFewVerbs {
                found: verbs.len(),
                required: GRID_CELLS,
            });
        }

        Ok(Self { verbs })
    }

    pub fn verbs(&self) -> &[Verb] {
        &self.verbs
    }

    pub fn len(&self) -> usize {
        self.verbs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verbs.is_empty()
    }
}

impl Default for VerbPool {
    fn default() -> Self {
        Self::default_catalog()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered_verbs(count: usize) -> Vec<Verb> {
        (0..count)
            .map(|i| Verb::new(&format!("verb{}", i), &format!("verbed{}", i), i % 2 == 0))
            .collect()
    }

    #[test]
    fn test_default_catalog_is_playable() {
        let pool = VerbPool::default_catalog();
        assert!(pool.len() >= GRID_CELLS);
        assert_eq!(VerbPool::validate(pool.verbs().to_vec()), Ok(pool));
    }

    #[test]
    fn test_validate_accepts_exactly_25() {
        let pool = VerbPool::validate(numbered_verbs(25)).unwrap();
        assert_eq!(pool.len(), 25);
    }

    #[test]
    fn test_validate_rejects_24() {
        assert_eq!(
            VerbPool::validate(numbered_verbs(24)),
            Err(ValidationError::TooFewVerbs {
                found: 24,
                required: 25
            })
        );
    }

    #[test]
    fn test_validate_drops_blank_entries_before_counting() {
        let mut verbs = numbered_verbs(24);
        verbs.push(Verb::new("  ", "went", false));
        verbs.push(Verb::new("go", "", false));
        assert_eq!(
            VerbPool::validate(verbs),
            Err(ValidationError::TooFewVerbs {
                found: 24,
                required: 25
            })
        );
    }

    #[test]
    fn test_validate_trims_forms() {
        let mut verbs = numbered_verbs(24);
        verbs.push(Verb::new(" go ", " went", false));
        let pool = VerbPool::validate(verbs).unwrap();
        assert_eq!(pool.verbs()[24], Verb::new("go", "went", false));
    }

    #[tokio::test]
    async fn test_load_missing_file_fails() {
        assert!(VerbPool::load("/nonexistent/verbs.json").await.is_err());
    }

    #[tokio::test]
    async fn test_load_reads_json_verb_list() {
        let path = std::env::temp_dir().join(format!("verbs-{}.json", uuid::Uuid::new_v4()));
        let json = serde_json::to_string(&numbered_verbs(30)).unwrap();
        tokio::fs::write(&path, json).await.unwrap();

        let pool = VerbPool::load(&path).await.unwrap();
        assert_eq!(pool.len(), 30);

        tokio::fs::remove_file(&path).await.unwrap();
    }
}

use std::fmt::{self, Display};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::storage::{Storage, UnionStorage};

pub const CATS_KEY: &str = "cats";
pub const SELECTED_CAT_KEY: &str = "selectedCat";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Cat {
    pub id: u32,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<CatAge>,

    /// Free text as typed in, e.g. `4.2kg`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatAge {
    pub years: u32,
    pub months: u32,
}

impl Display for CatAge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}y {}m", self.years, self.months)
    }
}

/// A cat profile that has not been stored yet.
#[derive(Debug, Clone, Default)]
pub struct NewCat {
    pub name: String,
    pub age: Option<CatAge>,
    pub weight: Option<String>,
}

/// Cat profiles kept next to the session in the same storage.
pub struct PetStore {
    storage: Arc<UnionStorage>,
}

impl PetStore {
    pub fn new(storage: Arc<UnionStorage>) -> Self {
        Self { storage }
    }

    /// Lists stored profiles, or the two sample cats when none were ever
    /// stored.
    pub fn list(&self) -> Result<Vec<Cat>> {
        let data = match self.storage.get(CATS_KEY).context("load cats")? {
            Some(data) => data,
            None => return Ok(Self::default_cats()),
        };
        match serde_json::from_str(&data) {
            Ok(cats) => Ok(cats),
            Err(_) => {
                warn!("Stored cat list is invalid, we will ignore it");
                Ok(Self::default_cats())
            }
        }
    }

    pub fn add(&self, cat: NewCat) -> Result<Cat> {
        let name = cat.name.trim();
        if name.is_empty() {
            bail!("cat name cannot be empty");
        }
        if let Some(age) = cat.age {
            if age.months > 11 {
                bail!("months must be in range [0, 11], got {}", age.months);
            }
        }

        let mut cats = self.list()?;
        let id = cats.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        let cat = Cat {
            id,
            name: name.to_string(),
            age: cat.age,
            weight: cat.weight.filter(|w| !w.trim().is_empty()),
        };
        cats.push(cat.clone());
        self.save(&cats)?;

        info!("Added cat '{}' with id {id}", cat.name);
        Ok(cat)
    }

    pub fn select(&self, id: u32) -> Result<Cat> {
        let cat = match self.list()?.into_iter().find(|c| c.id == id) {
            Some(cat) => cat,
            None => bail!("cat {id} not found"),
        };
        let data = serde_json::to_string(&cat).context("encode selected cat")?;
        self.storage
            .set(SELECTED_CAT_KEY, data)
            .context("save selected cat")?;
        Ok(cat)
    }

    pub fn selected(&self) -> Result<Option<Cat>> {
        let data = match self
            .storage
            .get(SELECTED_CAT_KEY)
            .context("load selected cat")?
        {
            Some(data) => data,
            None => return Ok(None),
        };
        match serde_json::from_str(&data) {
            Ok(cat) => Ok(Some(cat)),
            Err(_) => {
                warn!("Stored selected cat is invalid, we will ignore it");
                Ok(None)
            }
        }
    }

    fn save(&self, cats: &[Cat]) -> Result<()> {
        let data = serde_json::to_string(cats).context("encode cats")?;
        self.storage.set(CATS_KEY, data).context("save cats")
    }

    fn default_cats() -> Vec<Cat> {
        ["Milo", "Luna"]
            .into_iter()
            .zip(1..)
            .map(|(name, id)| Cat {
                id,
                name: name.to_string(),
                age: None,
                weight: None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::storage::MemoryStorage;

    use super::*;

    fn build_store() -> PetStore {
        PetStore::new(Arc::new(UnionStorage::Memory(MemoryStorage::new())))
    }

    #[test]
    fn test_default_list() {
        let store = build_store();
        let names: Vec<_> = store.list().unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Milo", "Luna"]);
        assert_eq!(store.selected().unwrap(), None);
    }

    #[test]
    fn test_add_select() {
        let store = build_store();
        let cat = store
            .add(NewCat {
                name: String::from(" Tom "),
                age: Some(CatAge {
                    years: 2,
                    months: 3,
                }),
                weight: Some(String::from("4.2kg")),
            })
            .unwrap();
        assert_eq!(cat.id, 3);
        assert_eq!(cat.name, "Tom");
        assert_eq!(cat.age.unwrap().to_string(), "2y 3m");
        assert_eq!(store.list().unwrap().len(), 3);

        let selected = store.select(3).unwrap();
        assert_eq!(store.selected().unwrap(), Some(selected));
        assert!(store.select(42).is_err());
    }

    #[test]
    fn test_add_invalid() {
        let store = build_store();
        assert!(store.add(NewCat::default()).is_err());
        let result = store.add(NewCat {
            name: String::from("Tom"),
            age: Some(CatAge {
                years: 1,
                months: 12,
            }),
            weight: None,
        });
        assert!(result.is_err());
    }
}

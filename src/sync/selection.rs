//! Deciding which saves a sync covers

/// The saves one invocation copies
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveSelection {
    /// Copy the whole saves tree as one directory
    All,
    /// Copy only these saves, in this order
    Named(Vec<String>),
}

/// Pick the saves to sync.
///
/// A non-blank `override_save` wins outright and the config list is ignored.
/// Otherwise a non-empty config list is used. Otherwise everything is synced.
pub fn select(override_save: Option<&str>, config_saves: Option<&[String]>) -> SaveSelection {
    if let Some(save) = override_save {
        let save = save.trim();
        if !save.is_empty() {
            return SaveSelection::Named(vec![save.to_string()]);
        }
    }

    if let Some(saves) = config_saves {
        let saves: Vec<String> = saves
            .iter()
            .map(|save| save.trim())
            .filter(|save| !save.is_empty())
            .map(str::to_string)
            .collect();
        if !saves.is_empty() {
            return SaveSelection::Named(saves);
        }
    }

    SaveSelection::All
}

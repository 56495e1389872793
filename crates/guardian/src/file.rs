use {
    crate::{DEFAULT_USER_ID, Guardian, GuardianError, GuardianStore},
    base::log,
    serde::{Deserialize, Serialize},
    std::path::{Path, PathBuf},
};

#[derive(Default, Serialize, Deserialize)]
struct GuardianFile {
    #[serde(default)]
    friends: Vec<Guardian>,
}

/// Keeps one `<user>.json` file per user in a directory.
pub struct FileGuardianStore {
    dir: PathBuf,
}

impl FileGuardianStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, GuardianError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing `user_id`.
    ///
    /// Letters, digits and `-` are kept; every other byte becomes `_XX` (uppercase hex), so
    /// distinct ids never share a file and no id can escape the directory.
    pub fn path_for(&self, user_id: &str) -> PathBuf {
        let user_id = user_id.trim();
        let user_id = if user_id.is_empty() { DEFAULT_USER_ID } else { user_id };
        let mut name = String::with_capacity(user_id.len());
        for byte in user_id.bytes() {
            if byte.is_ascii_alphanumeric() || byte == b'-' {
                name.push(byte as char);
            } else {
                name.push_str(&format!("_{:02X}", byte));
            }
        }
        self.dir.join(format!("{}.json", name))
    }

    fn read(&self, user_id: &str) -> Result<GuardianFile, GuardianError> {
        let path = self.path_for(user_id);
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                Ok(GuardianFile::default())
            }
            Err(error) => Err(error.into()),
        }
    }

    fn write(&self, user_id: &str, file: &GuardianFile) -> Result<(), GuardianError> {
        let path = self.path_for(user_id);
        let content = serde_json::to_string_pretty(file)?;
        std::fs::write(&path, content)?;
        log::debug!("wrote {} guardians to {}", file.friends.len(), path.display());
        Ok(())
    }

    fn update<F>(&self, user_id: &str, chat_id: i64, change: F) -> Result<Guardian, GuardianError>
    where
        F: FnOnce(&mut Vec<Guardian>, usize) -> Guardian,
    {
        let mut file = self.read(user_id)?;
        let index = file
            .friends
            .iter()
            .position(|guardian| guardian.chat_id == chat_id)
            .ok_or(GuardianError::NotFound(chat_id))?;
        let guardian = change(&mut file.friends, index);
        self.write(user_id, &file)?;
        Ok(guardian)
    }
}

impl GuardianStore for FileGuardianStore {
    fn list(&self, user_id: &str) -> Result<Vec<Guardian>, GuardianError> {
        Ok(self.read(user_id)?.friends)
    }

    fn add(&self, user_id: &str, guardian: Guardian) -> Result<Guardian, GuardianError> {
        let mut file = self.read(user_id)?;
        if file.friends.iter().any(|g| g.chat_id == guardian.chat_id) {
            return Err(GuardianError::AlreadyExists(guardian.chat_id));
        }
        file.friends.push(guardian.clone());
        self.write(user_id, &file)?;
        log::info!("{} is now a guardian of {}", guardian.name, user_id);
        Ok(guardian)
    }

    fn remove(&self, user_id: &str, chat_id: i64) -> Result<Guardian, GuardianError> {
        self.update(user_id, chat_id, |friends, index| friends.remove(index))
    }

    fn toggle(&self, user_id: &str, chat_id: i64) -> Result<Guardian, GuardianError> {
        self.update(user_id, chat_id, |friends, index| {
            friends[index].enabled = !friends[index].enabled;
            friends[index].clone()
        })
    }
}

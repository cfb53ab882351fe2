use crate::domain::ports::FileStore;
use crate::utils::error::Result;
use std::fs;
use std::path::Path;

/// 以行程工作目錄為基準的檔案存取：讀模型檔、寫批次輸出
#[derive(Debug, Clone)]
pub struct LocalFileStore {
    base_path: String,
}

impl LocalFileStore {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl FileStore for LocalFileStore {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = Path::new(&self.base_path).join(path);
        let data = fs::read(full_path)?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, data)?;
        Ok(())
    }
}

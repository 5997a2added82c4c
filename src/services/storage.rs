// src/services/storage.rs

use std::path::PathBuf;

use anyhow::Context;
use uuid::Uuid;

use crate::common::error::AppError;

// Blob store local: guarda o ficheiro em disco e devolve um URL servível
// (tower-http ServeDir monta a pasta em /files). A eliminação é pelo
// storage_path derivado, nunca pelo URL.
#[derive(Clone)]
pub struct FileStorage {
    root: PathBuf,
    public_base: String,
}

impl FileStorage {
    pub fn new(root: impl Into<PathBuf>, public_base: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base: public_base.into(),
        }
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    // Devolve (url, storage_path).
    pub async fn save(&self, file_name: &str, bytes: &[u8]) -> Result<(String, String), AppError> {
        let storage_name = format!("{}-{}", Uuid::new_v4(), sanitize(file_name));

        tokio::fs::create_dir_all(&self.root)
            .await
            .context("Falha ao criar a pasta de armazenamento")?;

        let path = self.root.join(&storage_name);
        tokio::fs::write(&path, bytes)
            .await
            .with_context(|| format!("Falha ao gravar o ficheiro {}", storage_name))?;

        let url = format!("{}/{}", self.public_base, storage_name);
        Ok((url, storage_name))
    }

    pub async fn delete(&self, storage_path: &str) -> Result<(), AppError> {
        // O nome guardado nunca tem separadores; nada de path traversal.
        let path = self.root.join(sanitize(storage_path));
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            // Já não existe: a eliminação é idempotente.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(anyhow::Error::new(e)
                .context(format!("Falha ao remover o ficheiro {}", storage_path))
                .into()),
        }
    }
}

fn sanitize(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "subor".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_path_separators() {
        assert_eq!(sanitize("../../etc/passwd"), ".._.._etc_passwd");
        assert_eq!(sanitize("faktúra 42.pdf"), "fakt_ra_42.pdf");
        assert_eq!(sanitize(""), "subor");
    }
}

//! Storage diagnostic sequence.
//!
//! Exercises the whole `ObjectStorage` surface with a throwaway object.
//! Every failure here is fatal: the caller propagates the error and the
//! process exits non-zero.

use super::ObjectStorage;
use crate::error::{Result, VisitReportError};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

pub async fn run_diagnostics<S: ObjectStorage>(
    storage: &S,
    prefix: &str,
    signed_url_ttl: Duration,
) -> Result<()> {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| VisitReportError::Storage(format!("clock error: {}", e)))?
        .as_millis();
    let key = format!("{}/probe-{}.txt", prefix, stamp);
    let payload = format!("visit-report storage probe {}", stamp).into_bytes();

    println!("[1/5] Verificando ausencia do objeto de teste...");
    if storage.exists(&key).await? {
        return Err(VisitReportError::Storage(format!(
            "probe object already exists: {}",
            key
        )));
    }
    println!("✔ chave livre: {}\n", key);

    println!("[2/5] Gravando objeto de teste...");
    storage.put(&key, &payload).await?;
    println!("✔ {} bytes gravados\n", payload.len());

    println!("[3/5] Lendo e comparando...");
    let read_back = storage.get(&key).await?;
    if read_back != payload {
        return Err(VisitReportError::Storage(format!(
            "payload mismatch: wrote {} bytes, read {} bytes",
            payload.len(),
            read_back.len()
        )));
    }
    println!("✔ conteudo confere\n");

    println!("[4/5] Emitindo URL assinada...");
    let url = storage.signed_url(&key, signed_url_ttl).await?;
    println!("✔ {}\n", url);

    println!("[5/5] Removendo objeto de teste...");
    storage.delete(&key).await?;
    if storage.exists(&key).await? {
        return Err(VisitReportError::Storage(format!(
            "object survived delete: {}",
            key
        )));
    }
    println!("✔ removido\n");

    Ok(())
}

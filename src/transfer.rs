//! CSV import and export of the trivia tables.

use std::path::Path;

use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::SqlitePool;

use crate::db::queries::categories::{get_all_categories, import_categories};
use crate::db::queries::questions::{get_all_questions, import_questions};
use crate::db::{Category, Question};

pub const CATEGORIES_FILE: &str = "categories.csv";
pub const QUESTIONS_FILE: &str = "questions.csv";

fn write_to(path: &Path, data: Vec<impl Serialize>) -> anyhow::Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Cannot create {}", path.display()))?;
    let mut wtr = csv::Writer::from_writer(file);
    for line in data {
        wtr.serialize(line)?;
    }
    wtr.flush()?;
    Ok(())
}

fn read_from<T: DeserializeOwned>(path: &Path) -> anyhow::Result<Vec<T>> {
    let file =
        std::fs::File::open(path).with_context(|| format!("Cannot open {}", path.display()))?;
    let mut rdr = csv::Reader::from_reader(file);
    let mut out = Vec::new();
    for record in rdr.deserialize() {
        let record: T = record.with_context(|| format!("Malformed row in {}", path.display()))?;
        out.push(record);
    }
    Ok(out)
}

pub async fn export_data(pool: &SqlitePool, dir: &Path) -> anyhow::Result<()> {
    let categories = get_all_categories(pool).await?;
    let questions = get_all_questions(pool).await?;
    if !dir.exists() {
        std::fs::create_dir_all(dir)?
    }
    tracing::info!(
        categories = categories.len(),
        questions = questions.len(),
        "Exporting to {}",
        dir.display()
    );
    write_to(&dir.join(CATEGORIES_FILE), categories)?;
    write_to(&dir.join(QUESTIONS_FILE), questions)?;
    Ok(())
}

/// Categories go in first so question rows can reference them. Both tables
/// are written in one transaction, so a bad row leaves the database untouched.
pub async fn import_data(pool: &SqlitePool, dir: &Path) -> anyhow::Result<()> {
    let categories: Vec<Category> = read_from(&dir.join(CATEGORIES_FILE))?;
    let questions: Vec<Question> = read_from(&dir.join(QUESTIONS_FILE))?;
    tracing::info!(
        categories = categories.len(),
        questions = questions.len(),
        "Importing from {}",
        dir.display()
    );
    let mut tx = pool.begin().await?;
    import_categories(&mut tx, categories)
        .await
        .context("Cannot import categories")?;
    import_questions(&mut tx, questions)
        .await
        .context("Cannot import questions")?;
    tx.commit().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::queries::questions::get_questions_for_category;
    use crate::db::tests::migrated_pool;

    #[tokio::test]
    async fn import_reads_frontend_seed_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CATEGORIES_FILE),
            "id,type\n1,Science\n2,Art\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join(QUESTIONS_FILE),
            "id,question,answer,category,difficulty\n\
             5,\"What is the heaviest organ in the human body?\",The Liver,1,4\n\
             9,\"Which Dutch graphic artist, initials M C, was a creator of optical illusions?\",Escher,2,1\n",
        )
        .unwrap();

        let pool = migrated_pool().await;
        import_data(&pool, dir.path()).await.unwrap();

        let art = get_questions_for_category(&pool, 2).await.unwrap();
        assert_eq!(art.len(), 1);
        assert_eq!(art[0].id, 9);
        assert_eq!(art[0].answer, "Escher");
    }

    #[tokio::test]
    async fn questions_with_unknown_category_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CATEGORIES_FILE), "id,type\n1,Science\n").unwrap();
        std::fs::write(
            dir.path().join(QUESTIONS_FILE),
            "id,question,answer,category,difficulty\n1,Q?,A,7,1\n",
        )
        .unwrap();

        let pool = migrated_pool().await;
        assert!(import_data(&pool, dir.path()).await.is_err());
        assert!(get_all_questions(&pool).await.unwrap().is_empty());
        assert!(get_all_categories(&pool).await.unwrap().is_empty());

        // the corrected files import cleanly on a second attempt
        std::fs::write(
            dir.path().join(QUESTIONS_FILE),
            "id,question,answer,category,difficulty\n1,Q?,A,1,1\n",
        )
        .unwrap();
        import_data(&pool, dir.path()).await.unwrap();
        assert_eq!(get_all_categories(&pool).await.unwrap().len(), 1);
        assert_eq!(get_all_questions(&pool).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn export_writes_both_tables() {
        let pool = migrated_pool().await;
        import_categories(
            &mut pool.acquire().await.unwrap(),
            vec![Category {
                id: 3,
                kind: "Geography".to_owned(),
            }],
        )
        .await
        .unwrap();
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("dump");

        export_data(&pool, &out).await.unwrap();

        let categories = std::fs::read_to_string(out.join(CATEGORIES_FILE)).unwrap();
        assert_eq!(categories, "id,type\n3,Geography\n");
        assert!(out.join(QUESTIONS_FILE).exists());
    }
}

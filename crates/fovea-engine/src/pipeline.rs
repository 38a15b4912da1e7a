//! The annotation pipeline: ties the annotator and classifier to storage
//! and exposes every dataset operation callers perform.

use std::path::Path;
use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use fovea_core::config::FoveaConfig;
use fovea_core::errors::{PipelineError, PipelineResult, StorageError};
use fovea_core::types::{
    AnnotationRecord, AnnotationStatus, BatchSelector, DatasetOverview, ImageRecord,
    ImageWithAnnotation, NewAnnotation, NewImage,
};
use fovea_storage::{queries, reset, DatabaseManager};

use crate::annotator::{Annotator, SimulatedAnnotator};
use crate::classifier;

/// Orchestrates image processing.
///
/// Owns the database manager and an annotator, nothing else. Every
/// operation runs to completion on the caller's thread.
pub struct AnnotationPipeline {
    db: Arc<DatabaseManager>,
    annotator: Box<dyn Annotator>,
}

impl AnnotationPipeline {
    /// Assemble a pipeline from parts.
    pub fn new(db: Arc<DatabaseManager>, annotator: Box<dyn Annotator>) -> Self {
        Self { db, annotator }
    }

    /// Open the configured database and wire up the simulated annotator.
    pub fn from_config(config: &FoveaConfig) -> PipelineResult<Self> {
        let db = DatabaseManager::open_with_pool_size(
            Path::new(config.storage.effective_db_path()),
            config.storage.effective_read_pool_size(),
        )?;
        Ok(Self::new(
            Arc::new(db),
            Box::new(SimulatedAnnotator::from_config(&config.annotator)),
        ))
    }

    /// Checkpoint and optimize the database before shutdown.
    pub fn close(&self) -> PipelineResult<()> {
        Ok(self.db.close()?)
    }

    /// Process one image through the annotator and persist the outcome.
    ///
    /// Reprocessing replaces any previous result; an image never holds two
    /// rows. Returns the stored record.
    pub fn process_image(&self, image_id: i64) -> PipelineResult<AnnotationRecord> {
        let image = self
            .db
            .with_reader(|conn| queries::images::get_image(conn, image_id))?
            .ok_or(PipelineError::ImageNotFound { id: image_id })?;

        let started = Instant::now();
        let analysis = self.annotator.analyze(&image)?;
        let outcome = classifier::classify(analysis.score, analysis.force_skip);
        let processing_time_ms = started.elapsed().as_millis() as i64;

        let annotations = match outcome.status {
            AnnotationStatus::Annotated => analysis.findings,
            _ => None,
        };

        let new_annotation = NewAnnotation {
            image_id,
            status: outcome.status,
            confidence_score: analysis.score,
            confidence_level: outcome.level,
            decision_reason: outcome.reason.to_string(),
            annotations,
            processing_time_ms,
            processed_at: now_ms(),
        };

        let row_id = self
            .db
            .with_writer(|conn| queries::annotations::replace_for_image(conn, &new_annotation))
            .map_err(|e| match e {
                StorageError::ConstraintViolation { .. } => {
                    PipelineError::DuplicateAnnotation { image_id }
                }
                other => PipelineError::Storage(other),
            })?;

        tracing::debug!(
            image_id,
            status = %outcome.status,
            score = analysis.score.value(),
            "image processed"
        );

        Ok(AnnotationRecord {
            id: row_id,
            image_id: new_annotation.image_id,
            status: new_annotation.status,
            confidence_score: new_annotation.confidence_score,
            confidence_level: new_annotation.confidence_level,
            decision_reason: new_annotation.decision_reason,
            annotations: new_annotation.annotations,
            processing_time_ms: new_annotation.processing_time_ms,
            processed_at: new_annotation.processed_at,
        })
    }

    /// Process a batch of images sequentially.
    ///
    /// A non-empty explicit id set wins and is processed in input order,
    /// re-annotating freely. Otherwise all-pending targets every image
    /// without a result, in id order. Otherwise the batch is empty, which
    /// is not an error. The batch aborts on the first per-item failure;
    /// records written by completed items remain.
    pub fn batch_process(&self, selector: &BatchSelector) -> PipelineResult<Vec<AnnotationRecord>> {
        let candidates: Vec<i64> = match &selector.image_ids {
            Some(ids) if !ids.is_empty() => ids.clone(),
            _ if selector.process_all_pending.unwrap_or(false) => self
                .db
                .with_reader(|conn| queries::images::pending_image_ids(conn))?,
            _ => Vec::new(),
        };

        let mut results = Vec::with_capacity(candidates.len());
        for image_id in &candidates {
            match self.process_image(*image_id) {
                Ok(record) => results.push(record),
                Err(e) => {
                    tracing::warn!(
                        image_id = *image_id,
                        completed = results.len(),
                        "batch aborted on failure"
                    );
                    return Err(e);
                }
            }
        }

        tracing::info!(
            requested = candidates.len(),
            processed = results.len(),
            "batch complete"
        );
        Ok(results)
    }

    /// Aggregate dataset statistics.
    pub fn get_overview(&self) -> PipelineResult<DatasetOverview> {
        Ok(self
            .db
            .with_reader(|conn| queries::overview::dataset_overview(conn))?)
    }

    /// Delete every annotation result, returning the dataset to pending.
    /// Reports the number of rows removed. Safe to call repeatedly.
    pub fn reset_all(&self) -> PipelineResult<u64> {
        let deleted = self
            .db
            .with_writer(|conn| reset::reset_annotations(conn))?;
        tracing::info!(deleted, "annotation results reset");
        Ok(deleted)
    }

    /// Register a new image. Returns the stored record.
    pub fn create_image(&self, image: &NewImage) -> PipelineResult<ImageRecord> {
        let id = self
            .db
            .with_writer(|conn| queries::images::insert_image(conn, image))?;
        let record = self
            .db
            .with_reader(|conn| queries::images::get_image(conn, id))?
            .ok_or(PipelineError::ImageNotFound { id })?;
        tracing::debug!(image_id = id, filename = %record.filename, "image created");
        Ok(record)
    }

    /// Fetch an image by id, `None` when absent.
    pub fn get_image(&self, id: i64) -> PipelineResult<Option<ImageRecord>> {
        Ok(self
            .db
            .with_reader(|conn| queries::images::get_image(conn, id))?)
    }

    /// List all images, most recent upload first.
    pub fn list_images(&self) -> PipelineResult<Vec<ImageRecord>> {
        Ok(self.db.with_reader(|conn| queries::images::list_images(conn))?)
    }

    /// Delete an image; its annotation result cascades away.
    /// Returns whether a row was removed.
    pub fn delete_image(&self, id: i64) -> PipelineResult<bool> {
        let deleted = self
            .db
            .with_writer(|conn| queries::images::delete_image(conn, id))?;
        if deleted {
            tracing::debug!(image_id = id, "image deleted");
        }
        Ok(deleted)
    }

    /// Fetch an image together with its annotation result, if the image exists.
    pub fn get_image_with_annotation(
        &self,
        id: i64,
    ) -> PipelineResult<Option<ImageWithAnnotation>> {
        Ok(self
            .db
            .with_reader(|conn| queries::images::get_image_with_annotation(conn, id))?)
    }

    /// List all images together with their annotation results.
    pub fn list_images_with_annotations(&self) -> PipelineResult<Vec<ImageWithAnnotation>> {
        Ok(self
            .db
            .with_reader(|conn| queries::images::list_images_with_annotations(conn))?)
    }

    /// List all annotation results, most recently processed first.
    pub fn list_annotations(&self) -> PipelineResult<Vec<AnnotationRecord>> {
        Ok(self
            .db
            .with_reader(|conn| queries::annotations::list_annotations(conn))?)
    }
}

fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}

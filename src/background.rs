use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info, info_span, Instrument};
use crate::domain::models::job::Job;
use crate::error::AppError;
use crate::state::AppState;

pub async fn start_background_worker(state: Arc<AppState>) {
    info!("Starting background job worker...");

    loop {
        match state.job_repo.find_pending(10).await {
            Ok(jobs) => {
                for job in jobs {
                    let span = info_span!(
                        "background_job",
                        job_id = %job.id,
                        job_type = %job.job_type,
                    );

                    let state = state.clone();

                    async move {
                        info!("Processing job: {}", job.job_type);
                        match process_job(&state, &job).await {
                            Ok(_) => {
                                info!("Job completed successfully");
                                if let Err(e) = state.job_repo.update_status(&job.id, "COMPLETED", None).await {
                                    error!("Failed to mark job as completed: {:?}", e);
                                }
                            },
                            Err(e) => {
                                let err_msg = format!("{}", e);
                                error!("Job failed with error: {}", err_msg);
                                if let Err(up_err) = state.job_repo.update_status(&job.id, "FAILED", Some(err_msg)).await {
                                    error!("Failed to mark job as failed: {:?}", up_err);
                                }
                            }
                        }
                    }
                        .instrument(span)
                        .await;
                }
            }
            Err(e) => error!("Failed to fetch pending jobs: {:?}", e),
        }
        sleep(Duration::from_secs(5)).await;
    }
}

async fn process_job(state: &Arc<AppState>, job: &Job) -> Result<(), AppError> {
    let clinic = state.clinic_repo.find_by_id(&job.payload.clinic_id).await?
        .ok_or(AppError::NotFound(format!("Clinic {} not found", job.payload.clinic_id)))?;

    let (template_name, subject, context) = match job.job_type.as_str() {
        "REVIEW_SUBMITTED" => {
            let review_id = job.payload.review_id.as_deref()
                .ok_or(AppError::InternalWithMsg("Review job without review_id".to_string()))?;
            let review = state.review_repo.find_by_id(review_id).await?
                .ok_or(AppError::NotFound(format!("Review {} not found", review_id)))?;

            let mut context = tera::Context::new();
            context.insert("clinic_name", &clinic.name);
            context.insert("author_name", &review.author_name);
            context.insert("rating", &review.rating);
            context.insert("review_body", &review.body);
            context.insert("submitted_at", &review.created_at.format("%Y-%m-%d %H:%M").to_string());

            let subject = format!("New review for {}", clinic.name);
            ("review_notification.html", subject, context)
        }
        "CLINIC_SUBMITTED" => {
            let mut context = tera::Context::new();
            context.insert("clinic_name", &clinic.name);
            context.insert("address", &clinic.address);
            context.insert("phone", &clinic.phone);
            context.insert("submitted_at", &clinic.created_at.format("%Y-%m-%d %H:%M").to_string());

            let subject = format!("New clinic submission: {}", clinic.name);
            ("clinic_submission.html", subject, context)
        }
        other => {
            return Err(AppError::InternalWithMsg(format!("Unknown job type {}", other)));
        }
    };

    let html_body = state.templates.render(template_name, &context)
        .map_err(|e| AppError::InternalWithMsg(format!("Template render error: {:?}", e)))?;

    let recipient = &state.config.notification_email;
    info!("Sending {} notification to {}", job.job_type, recipient);
    state.email_service.send(recipient, &subject, &html_body).await?;

    Ok(())
}

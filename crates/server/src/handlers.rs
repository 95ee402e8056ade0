use super::*;
use actix_multipart::Multipart;
use actix_web::Responder;
use qd_auth::Auth;
use qd_database::*;
use qd_dto::*;

pub async fn health(config: web::Data<Config>) -> impl Responder {
    let config = config.into_inner();
    match web::block(move || -> Result<()> {
        let conn = resolve(&config, Source::Local, None)?;
        Ok(conn.execute_batch("SELECT 1")?)
    })
    .await
    {
        Ok(Ok(())) => HttpResponse::Ok().body("ok"),
        Ok(Err(e)) => {
            log::error!("health check failed: {}", e);
            HttpResponse::ServiceUnavailable().body("database unavailable")
        }
        Err(e) => {
            log::error!("health check failed: {}", e);
            HttpResponse::ServiceUnavailable().body("database unavailable")
        }
    }
}

pub async fn query(
    config: web::Data<Config>,
    auth: Auth,
    req: web::Json<QueryRequest>,
) -> impl Responder {
    let config = config.into_inner();
    let fallback = auth.db_path().map(String::from);
    let req = req.into_inner();
    match web::block(move || run_query(&config, req, fallback)).await {
        Err(e) => HttpResponse::InternalServerError().json(ErrorDetail::from(&e)),
        Ok(Err(e)) => {
            log::info!("query rejected: {}", e);
            HttpResponse::BadRequest().json(ErrorDetail::from(&e))
        }
        Ok(Ok(table)) => HttpResponse::Ok().json(table),
    }
}

pub async fn upload(config: web::Data<Config>, auth: Auth, payload: Multipart) -> impl Responder {
    let form = match Form::read(payload).await {
        Err(e) => return HttpResponse::BadRequest().json(ErrorDetail::from(&e)),
        Ok(form) => form,
    };
    let Some(staged) = form.file else {
        return HttpResponse::BadRequest().json(ErrorDetail::from("file is required"));
    };
    let Some(table) = form.table_name else {
        return HttpResponse::BadRequest().json(ErrorDetail::from("table_name is required"));
    };
    let config = config.into_inner();
    let path = auth.db_path().map(String::from);
    let key = form.primary_key;
    let name = table.clone();
    match web::block(move || merge_upload(&config, path.as_deref(), &name, &key, staged)).await {
        Err(e) => HttpResponse::InternalServerError().json(ErrorDetail::from(&e)),
        Ok(Err(e)) => {
            log::info!("upload into {:?} rejected: {}", table, e);
            HttpResponse::BadRequest().json(ErrorDetail::from(&e))
        }
        Ok(Ok(rows)) => HttpResponse::Ok().json(UploadResponse { table, rows }),
    }
}

/// A token's database only replaces the local default; remote and
/// Parquet sources keep their own meaning of `path`.
fn run_query(config: &Config, req: QueryRequest, fallback: Option<String>) -> Result<QueryResponse> {
    let source = Source::try_from(req.source.as_str())?;
    let path = match source {
        Source::Local => req.path.or(fallback),
        _ => req.path,
    };
    let conn = resolve(config, source, path.as_deref())?;
    execute(&conn, &req.sql)
}

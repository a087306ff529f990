//! HTTP endpoints.

use super::app::AppContext;
use super::pages;
use crate::charts::StaticChartRenderer;
use crate::stats::StatsCalculator;
use actix_web::http::header::ContentType;
use actix_web::{get, web, HttpRequest, HttpResponse};
use base64::prelude::*;

const DEFAULT_ROWS: i64 = 50;

const LOAD_FAILED: &str = "Data file not found or failed to load.";
const NO_CHART_DATA: &str = "No data available for charting.";

const CHART_WIDTH: u32 = 1000;
const CHART_HEIGHT: u32 = 500;

/// `rows` from the query string; anything but an integer means the default.
/// The first `rows` pair wins when repeated.
pub fn requested_rows(query: &str) -> i64 {
    web::Query::<Vec<(String, String)>>::from_query(query)
        .ok()
        .and_then(|q| q.into_inner().into_iter().find(|(k, _)| k == "rows"))
        .and_then(|(_, v)| parse_row_count(&v))
        .unwrap_or(DEFAULT_ROWS)
}

/// Optionally signed decimal integer. Out-of-range values saturate, so a huge
/// count still means "every row".
fn parse_row_count(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(n) = raw.parse::<i64>() {
        return Some(n);
    }

    let (negative, digits) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(if negative { i64::MIN } else { i64::MAX })
}

fn server_error(message: String) -> HttpResponse {
    log::warn!("500: {}", message);
    HttpResponse::InternalServerError()
        .content_type(ContentType::plaintext())
        .body(message)
}

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok().content_type(ContentType::html()).body(body)
}

#[get("/")]
pub async fn index(req: HttpRequest, ctx: web::Data<AppContext>) -> HttpResponse {
    let Some(dataset) = ctx.dataset() else {
        return server_error(format!(
            "{} Expected: {}",
            LOAD_FAILED,
            ctx.data_file().display()
        ));
    };

    let rows = requested_rows(req.query_string());
    html(pages::table_page(dataset.table.head(rows), rows))
}

#[get("/full")]
pub async fn full_table(ctx: web::Data<AppContext>) -> HttpResponse {
    let Some(dataset) = ctx.dataset() else {
        return server_error(LOAD_FAILED.to_string());
    };

    let table = &dataset.table;
    html(pages::table_page(table.records(), table.len() as i64))
}

#[get("/api")]
pub async fn api(req: HttpRequest, ctx: web::Data<AppContext>) -> HttpResponse {
    let Some(dataset) = ctx.dataset() else {
        return server_error(LOAD_FAILED.to_string());
    };

    let rows = requested_rows(req.query_string());
    HttpResponse::Ok().json(dataset.table.head(rows))
}

#[get("/viz/monthly-volume")]
pub async fn monthly_volume(ctx: web::Data<AppContext>) -> HttpResponse {
    let Some(dataset) = ctx.dataset() else {
        return server_error(LOAD_FAILED.to_string());
    };

    let series = StatsCalculator::monthly_mean_volume_all(&dataset.partitions);
    if series.is_empty() {
        return server_error(NO_CHART_DATA.to_string());
    }

    match StaticChartRenderer::render_monthly_volume_png(&series, CHART_WIDTH, CHART_HEIGHT) {
        Ok(png) => html(pages::chart_page(&series, &BASE64_STANDARD.encode(png))),
        Err(e) => {
            log::error!("Monthly volume chart failed: {}", e);
            server_error("Failed to render chart.".to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requested_rows() {
        assert_eq!(requested_rows(""), 50);
        assert_eq!(requested_rows("rows=3"), 3);
        assert_eq!(requested_rows("rows=abc"), 50);
        assert_eq!(requested_rows("rows="), 50);
        assert_eq!(requested_rows("rows=2.5"), 50);
        assert_eq!(requested_rows("rows=%2012%20"), 12);
        assert_eq!(requested_rows("rows=-4"), -4);
        assert_eq!(requested_rows("rows=100000"), 100000);
        assert_eq!(requested_rows("other=1&rows=8&rows=9"), 8);
    }

    #[test]
    fn test_requested_rows_saturates() {
        assert_eq!(requested_rows("rows=99999999999999999999"), i64::MAX);
        assert_eq!(requested_rows("rows=%2B99999999999999999999"), i64::MAX);
        assert_eq!(requested_rows("rows=-99999999999999999999"), i64::MIN);
        assert_eq!(requested_rows("rows=99999999999999999999x"), 50);
        assert_eq!(requested_rows("rows=-"), 50);
    }
}

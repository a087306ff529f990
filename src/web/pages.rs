//! HTML page shells for the table and chart views.

use crate::charts::StaticChartRenderer;
use crate::data::Record;
use crate::stats::MonthlySeries;

const BOOTSTRAP_CSS: &str = "https://cdn.jsdelivr.net/npm/bootstrap@5.3.2/dist/css/bootstrap.min.css";

fn shell(title: &str, body: &str) -> String {
    format!(
        r#"<!doctype html>
<html lang="en">
	<head>
		<meta charset="utf-8">
		<meta name="viewport" content="width=device-width, initial-scale=1">
		<title>{title}</title>
		<link rel="stylesheet" href="{css}">
	</head>
	<body class="p-4">
		<div class="container">
{body}
		</div>
	</body>
</html>
"#,
        title = title,
        css = BOOTSTRAP_CSS,
        body = body
    )
}

/// Records as a striped Bootstrap table, no index column.
pub fn records_table(records: &[Record]) -> String {
    let mut html = String::from(
        "<table border=\"0\" class=\"dataframe table table-striped table-sm\">\n\
         \x20 <thead>\n\
         \x20   <tr style=\"text-align: right;\">\n\
         \x20     <th>Date</th>\n\
         \x20     <th>Open</th>\n\
         \x20     <th>High</th>\n\
         \x20     <th>Low</th>\n\
         \x20     <th>Close</th>\n\
         \x20     <th>Volume</th>\n\
         \x20   </tr>\n\
         \x20 </thead>\n\
         \x20 <tbody>\n",
    );
    for r in records {
        html.push_str(&format!(
            "    <tr>\n      <td>{}</td>\n      <td>{}</td>\n      <td>{}</td>\n      <td>{}</td>\n      <td>{}</td>\n      <td>{}</td>\n    </tr>\n",
            r.date.format("%Y-%m-%d"),
            r.open,
            r.high,
            r.low,
            r.close,
            r.volume
        ));
    }
    html.push_str("  </tbody>\n</table>");
    html
}

/// Table view with the row-count form.
pub fn table_page(records: &[Record], rows: i64) -> String {
    let body = format!(
        r#"			<h1>QCOM Data (showing top {rows})</h1>
			<div class="mb-2">
				<form method="get" class="row g-2">
					<div class="col-auto">
						<label class="visually-hidden" for="rows">Rows</label>
						<input id="rows" name="rows" type="number" min="1" value="{rows}" class="form-control" />
					</div>
					<div class="col-auto">
						<button class="btn btn-primary">Refresh</button>
					</div>
				</form>
			</div>
			<div class="table-responsive">{table}</div>"#,
        rows = rows,
        table = records_table(records)
    );
    shell("QCOM data", &body)
}

/// Chart view: embedded PNG plus a legend naming each line.
pub fn chart_page(series: &[MonthlySeries], png_base64: &str) -> String {
    let mut legend = String::new();
    for (idx, s) in series.iter().enumerate() {
        legend.push_str(&format!(
            "\t\t\t\t<li class=\"legend-item list-inline-item\"><span style=\"display:inline-block;width:1em;height:1em;background:{};\"></span> {} ({} months)</li>\n",
            StaticChartRenderer::series_color_hex(idx),
            s.name,
            s.points.len()
        ));
    }

    let body = format!(
        r#"			<h1>QCOM Monthly Mean Volume</h1>
			<ul class="list-inline">
{legend}			</ul>
			<img class="img-fluid" alt="Monthly mean volume by period" src="data:image/png;base64,{png}" />"#,
        legend = legend,
        png = png_base64
    );
    shell("QCOM monthly volume", &body)
}

//! Parsing of the ISU timetable table.
//!
//! Every `<tr>` of the table body is one row. Rows with class `dayheader`
//! name the weekday in their first cell and may carry a lesson in the
//! remaining cells; rows with class `noinfo` are empty slots. Lesson cells,
//! in order: (weekday), time range, weeks, subject, type, counterpart,
//! room, comment.

use anyhow::{Result, anyhow};
use scraper::{ElementRef, Html, Selector};
use timetable_core::{LessonRow, RawRow};

const LESSON_CELLS: usize = 8;

pub fn parse_rows(html: &str) -> Result<Vec<RawRow>> {
    let document = Html::parse_document(html);
    let tbody = selector("tbody")?;
    let tr = selector("tr")?;
    let td = selector("td")?;

    let body = document
        .select(&tbody)
        .next()
        .ok_or_else(|| anyhow!("Timetable response has no table body"))?;

    let mut rows = Vec::new();

    for (index, row) in body.select(&tr).enumerate() {
        let cells: Vec<String> = row.select(&td).map(cell_text).collect();
        let is_header = has_class(&row, "dayheader");

        if is_header {
            let day = cells
                .first()
                .ok_or_else(|| anyhow!("Day header row {} has no cells", index + 1))?;
            rows.push(RawRow::DayHeader(day.clone()));
        }

        if has_class(&row, "noinfo") {
            rows.push(RawRow::NoInfo);
            continue;
        }

        if cells.len() < LESSON_CELLS {
            // A header without lesson cells only names the day
            if is_header {
                continue;
            }
            anyhow::bail!(
                "Timetable row {} has {} cells, expected {}",
                index + 1,
                cells.len(),
                LESSON_CELLS
            );
        }

        rows.push(RawRow::Lesson(LessonRow {
            time_range: cells[1].clone(),
            weeks: cells[2].clone(),
            subject: cells[3].clone(),
            lesson_type: cells[4].clone(),
            counterpart: cells[5].clone(),
            room: cells[6].clone(),
            comment: cells[7].clone(),
        }));
    }

    tracing::debug!(rows = rows.len(), "Parsed timetable rows");

    Ok(rows)
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow!("Invalid selector '{}': {}", css, e))
}

fn has_class(element: &ElementRef, class: &str) -> bool {
    element.value().classes().any(|c| c == class)
}

fn cell_text(cell: ElementRef) -> String {
    cell.text().collect::<String>().trim().to_string()
}

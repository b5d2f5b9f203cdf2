use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::model::{Instant, Job, Schedule, TimeSpan};

/// Outcome of a CSV import: the schedule plus how many rows were rejected.
#[derive(Debug)]
pub struct ImportReport {
    pub schedule: Schedule,
    pub skipped: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Machine,
    Job,
    Start,
    End,
}

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%d/%m/%Y %H:%M",
    "%d.%m.%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%d.%m.%Y"];

/// Parse a timestamp in any of the accepted layouts. Naive values are UTC;
/// bare dates mean midnight.
fn parse_instant(s: &str) -> Option<Instant> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return date
                .and_hms_opt(0, 0, 0)
                .map(|naive| Utc.from_utc_datetime(&naive));
        }
    }
    None
}

/// Pick the separator that occurs most often in the header line.
fn detect_delimiter(first_line: &str) -> u8 {
    let semicolons = first_line.matches(';').count();
    let commas = first_line.matches(',').count();
    let tabs = first_line.matches('\t').count();

    if semicolons >= commas && semicolons >= tabs {
        b';'
    } else if tabs >= commas {
        b'\t'
    } else {
        b','
    }
}

fn header_to_column(header: &str) -> Option<Column> {
    let normalized = header.trim().to_lowercase().replace([' ', '-', '_'], "");
    match normalized.as_str() {
        "machine" | "resource" | "workcenter" | "workstation" | "station" | "line" => {
            Some(Column::Machine)
        }
        "job" | "jobname" | "order" | "workorder" | "operation" | "task" | "name" => {
            Some(Column::Job)
        }
        "start" | "startdate" | "starttime" | "begin" | "from" => Some(Column::Start),
        "end" | "enddate" | "endtime" | "finish" | "to" | "due" => Some(Column::End),
        _ => None,
    }
}

/// Import a schedule from a delimited file on disk.
pub fn import_csv(path: &Path) -> Result<ImportReport> {
    let content = std::fs::read_to_string(path)?;
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Imported schedule");
    parse_schedule(name, &content)
}

/// Parse schedule rows from CSV text. Rows with missing fields, unreadable
/// timestamps or an end before the start are skipped and counted.
pub fn parse_schedule(name: &str, content: &str) -> Result<ImportReport> {
    let first_line = content.lines().next().unwrap_or("");
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(detect_delimiter(first_line))
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();
    let columns: Vec<Option<Column>> = headers.iter().map(header_to_column).collect();

    let missing: Vec<&'static str> = [
        (Column::Machine, "machine"),
        (Column::Job, "job"),
        (Column::Start, "start"),
        (Column::End, "end"),
    ]
    .into_iter()
    .filter(|(col, _)| !columns.contains(&Some(*col)))
    .map(|(_, label)| label)
    .collect();
    if !missing.is_empty() {
        return Err(Error::MissingColumns {
            missing,
            found: headers.iter().map(str::to_string).collect(),
        });
    }

    let mut schedule = Schedule::new(name);
    let mut skipped = 0usize;

    for (i, record) in reader.records().enumerate() {
        // Header is line 1.
        let line = i + 2;
        let record = match record {
            Ok(r) => r,
            Err(e) => {
                warn!(line, error = %e, "skipping unreadable CSV row");
                skipped += 1;
                continue;
            }
        };

        let field = |wanted: Column| {
            columns
                .iter()
                .position(|c| *c == Some(wanted))
                .and_then(|idx| record.get(idx))
                .filter(|v| !v.is_empty())
        };

        let (Some(machine), Some(job)) = (field(Column::Machine), field(Column::Job)) else {
            warn!(line, "skipping row without machine or job name");
            skipped += 1;
            continue;
        };

        let start = field(Column::Start).and_then(parse_instant);
        let end = field(Column::End).and_then(parse_instant);
        let (Some(start), Some(end)) = (start, end) else {
            warn!(line, job, "skipping row with unreadable start or end");
            skipped += 1;
            continue;
        };

        match TimeSpan::new(start, end) {
            Ok(span) => schedule.push_job(machine, Job::new(job, span)),
            Err(e) => {
                warn!(line, job, error = %e, "skipping row");
                skipped += 1;
            }
        }
    }

    if schedule.is_empty() {
        return Err(Error::NoRows { skipped });
    }

    debug!(
        lanes = schedule.lanes.len(),
        jobs = schedule.job_count(),
        skipped,
        "parsed schedule"
    );
    Ok(ImportReport { schedule, skipped })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_semicolon_file_with_loose_headers() {
        let csv = "\
Work Center;Work Order;Start Time;End Time
Press 7;WO-1001;2024-05-06 06:00;2024-05-06 14:00
Lathe 2;WO-1002;2024-05-06T08:30:00Z;2024-05-07 08:30
Press 7;WO-1003;07/05/2024;08/05/2024
";
        let report = parse_schedule("week 19", csv).unwrap();
        assert_eq!(report.skipped, 0);
        let schedule = report.schedule;
        assert_eq!(schedule.name, "week 19");
        assert_eq!(schedule.lanes.len(), 2);
        assert_eq!(schedule.lanes[0].machine, "Press 7");
        assert_eq!(schedule.lanes[0].jobs.len(), 2);
        assert_eq!(
            schedule.lanes[1].jobs[0].span.start(),
            Utc.with_ymd_and_hms(2024, 5, 6, 8, 30, 0).unwrap()
        );
        assert_eq!(
            schedule.lanes[0].jobs[1].span.end(),
            Utc.with_ymd_and_hms(2024, 5, 8, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn skips_bad_rows_and_counts_them() {
        let csv = "\
machine,job,start,end
Mill,A,2024-05-06,2024-05-07
Mill,B,yesterday,2024-05-07
Mill,C,2024-05-09,2024-05-08
,D,2024-05-06,2024-05-07
Saw,E,2024-05-06 10:00,2024-05-06 10:00
";
        let report = parse_schedule("s", csv).unwrap();
        assert_eq!(report.skipped, 3);
        assert_eq!(report.schedule.job_count(), 2);
        assert!(report.schedule.lanes[1].jobs[0].span.is_instant());
    }

    #[test]
    fn reports_missing_columns() {
        let err = parse_schedule("s", "machine,start,end\nMill,2024-05-06,2024-05-07\n").unwrap_err();
        match err {
            Error::MissingColumns { missing, found } => {
                assert_eq!(missing, vec!["job"]);
                assert_eq!(found.len(), 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn all_rows_rejected_is_an_error() {
        let err = parse_schedule("s", "machine\tjob\tstart\tend\nMill\tA\tnope\tnope\n").unwrap_err();
        assert!(matches!(err, Error::NoRows { skipped: 1 }));
    }

    #[test]
    fn delimiter_detection() {
        assert_eq!(detect_delimiter("a;b;c"), b';');
        assert_eq!(detect_delimiter("a,b,c"), b',');
        assert_eq!(detect_delimiter("a\tb\tc"), b'\t');
    }
}

/// CSV rendering of an account's loads
use crate::error::{AppError, AppResult};
use crate::models::LoadWithDriver;

pub const CSV_HEADER: [&str; 7] = ["Load Ref", "Pickup", "Drop", "Rate", "Date", "Status", "Driver"];
pub const EXPORT_FILENAME: &str = "my_loads_export.csv";

pub struct ExportService;

impl ExportService {
    pub fn loads_to_csv(loads: &[LoadWithDriver]) -> AppResult<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(CSV_HEADER)?;

        for row in loads {
            let load = &row.load;
            writer.write_record([
                load.load_ref.as_str(),
                load.pickup.as_str(),
                load.drop.as_str(),
                &format!("{:.2}", load.rate),
                load.date.as_str(),
                load.status.as_str(),
                row.driver_label(),
            ])?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| AppError::CsvOutput(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| AppError::CsvOutput(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Load, LoadStatus};
    use chrono::Utc;

    fn row(id: i64, pickup: &str, driver: Option<&str>) -> LoadWithDriver {
        LoadWithDriver {
            load: Load {
                id,
                load_ref: format!("LD-{}", 1000 + id),
                pickup: pickup.to_string(),
                drop: "Tulsa, OK".to_string(),
                date: "2024-05-01".to_string(),
                rate: 1500.0,
                status: LoadStatus::InTransit,
                driver_id: driver.map(|_| 1),
                account_id: 1,
                created_at: Utc::now(),
            },
            driver_name: driver.map(str::to_string),
        }
    }

    #[test]
    fn test_header_and_rows() {
        let csv = ExportService::loads_to_csv(&[row(1, "Dallas", Some("Sam")), row(2, "Austin", None)]).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Load Ref,Pickup,Drop,Rate,Date,Status,Driver");
        assert_eq!(lines[1], "LD-1001,Dallas,\"Tulsa, OK\",1500.00,2024-05-01,In Transit,Sam");
        assert_eq!(lines[2], "LD-1002,Austin,\"Tulsa, OK\",1500.00,2024-05-01,In Transit,Unassigned");
    }

    #[test]
    fn test_empty_export_has_header_only() {
        let csv = ExportService::loads_to_csv(&[]).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines, vec!["Load Ref,Pickup,Drop,Rate,Date,Status,Driver"]);
    }
}

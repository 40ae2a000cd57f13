//! Sample CSV templates for each builtin file type.
//!
//! Templates are raw CSV text so layout quirks survive verbatim; the
//! attrition template keeps its report-title line above the real headers,
//! matching the `skip_leading_rows` offset its rule declares.

/// Template CSVs for one file type as `(file name, contents)` pairs.
/// Multi-sheet types produce one file per sheet, named
/// `<type>_<sheet>.csv`.
pub fn template_files(file_type: &str) -> Option<Vec<(String, String)>> {
    let files = match file_type {
        "attrition" => vec![(
            "attrition.csv".to_string(),
            "Attrition Report,,,\n\
             week,job_type,attrition_count,hire_date\n\
             2025-01-06,A,5.2,2025/01/13\n\
             2025-01-13,B,2.1,2025/01/13\n\
             2025-01-20,C,4.8,2025/01/06\n"
                .to_string(),
        )],
        "recruitment" => vec![(
            "recruitment.csv".to_string(),
            "week,job_type,recruitment_count\n\
             2025-01-06,A,15\n\
             2025-01-13,B,8\n\
             2025-01-20,C,12\n"
                .to_string(),
        )],
        "fte" => vec![(
            "fte.csv".to_string(),
            "week,job_type,fte_count\n\
             2025-01-06,A,120.5\n\
             2025-01-13,B,85.2\n\
             2025-01-20,C,95.8\n"
                .to_string(),
        )],
        "fte_wide" => vec![(
            "fte_wide.csv".to_string(),
            "job_type,2025-01-06,2025-01-13,2025-01-20\n\
             A,120.5,121.0,119.8\n\
             B,85.2,86.0,84.5\n\
             C,95.8,96.5,94.0\n"
                .to_string(),
        )],
        "patch_mapping" => vec![(
            "patch_mapping.csv".to_string(),
            "wmis,region\n\
             A,North\n\
             B,South\n\
             C,East\n"
                .to_string(),
        )],
        "resource_allocation" => vec![(
            "resource_allocation.csv".to_string(),
            "date_1,date_2,date_3,skill,New York,Los Angeles,Chicago\n\
             15/01/2025,Jan-25,01/15/25,MS,100.5,85.0,75.5\n\
             15/02/2025,Feb-25,02/15/25,SS,105.2,88.5,78.0\n\
             15/03/2025,Mar-25,03/15/25,MS,98.8,90.2,82.3\n"
                .to_string(),
        )],
        "demand" => vec![
            (
                "demand_Volume.csv".to_string(),
                "job_type,2025-01-06,2025-01-13,2025-01-20\n\
                 A,100,105,98\n\
                 B,80,82,78\n\
                 C,90,92,95\n"
                    .to_string(),
            ),
            (
                "demand_Mix.csv".to_string(),
                "job_type,2025-01-06,2025-01-13,2025-01-20\n\
                 A,8.0,8.1,7.9\n\
                 B,7.5,7.6,7.4\n\
                 C,8.2,8.3,8.0\n"
                    .to_string(),
            ),
        ],
        _ => return None,
    };
    Some(files)
}

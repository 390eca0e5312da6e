use anyhow::{Context, Result};

/// (program, code prefix, module titles per year)
const PROGRAMS: [(&str, &str, [&str; 4]); 3] = [
    (
        "Computer Science",
        "CS",
        ["Intro to Programming", "Data Structures", "Operating Systems", "Compilers"],
    ),
    (
        "Physics",
        "PH",
        ["Mechanics", "Electromagnetism", "Quantum Physics", "Condensed Matter"],
    ),
    (
        "Mathematics",
        "MA",
        ["Calculus", "Linear Algebra", "Real Analysis", "Topology, Advanced"],
    ),
];

const SEMESTERS: [&str; 2] = ["Autumn", "Spring"];

fn main() -> Result<()> {
    let output_path = "academic_curriculum.csv";
    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;

    writer.write_record([
        "ProgramName",
        "YearOfStudy",
        "SemesterName",
        "ModuleType",
        "Modules",
        "Credits",
    ])?;

    let mut rows = 0;
    for (program, prefix, titles) in PROGRAMS {
        for (year_idx, title) in titles.iter().enumerate() {
            let year = year_idx + 1;
            for (sem_idx, semester) in SEMESTERS.iter().enumerate() {
                for slot in 0..3 {
                    let module_type = if slot == 0 || year == 1 { "Core" } else { "Elective" };
                    let code = format!("{prefix}{year}{sem_idx}{slot}");
                    let part = sem_idx * 3 + slot + 1;
                    let credits = if module_type == "Core" { 15 } else { 10 };

                    writer.write_record([
                        program.to_string(),
                        year.to_string(),
                        semester.to_string(),
                        module_type.to_string(),
                        format!("{code} {title} {part}"),
                        credits.to_string(),
                    ])?;
                    rows += 1;
                }
            }
        }
    }

    writer.flush().context("flushing CSV")?;
    println!("Wrote {rows} curriculum records to {output_path}");
    Ok(())
}

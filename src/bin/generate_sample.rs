use anyhow::{Context, Result};
use rust_xlsxwriter::Workbook;

/// Where the dashboard looks for its workbook by default.
const OUTPUT_PATH: &str = "data/Master Data set v13 - Form - 20250731.xlsx";

const SHEET_NAME: &str = "Master";

const HEADERS: [&str; 9] = [
    "Level 1",
    "Level 2",
    "Level 3",
    "Province",
    "Project Year",
    "Quantity",
    "Volunteer Hours",
    "Value R",
    "Souls",
];

const PROVINCES: [&str; 9] = [
    "Eastern Cape",
    "Free State",
    "Gauteng",
    "KwaZulu-Natal",
    "Limpopo",
    "Mpumalanga",
    "North West",
    "Northern Cape",
    "Western Cape",
];

const YEARS: [f64; 6] = [2020.0, 2021.0, 2022.0, 2023.0, 2024.0, 2025.0];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    // Level 1, Level 2, Level 3 pool, and base magnitudes for
    // [quantity, volunteer hours, value R, souls].
    let programmes: Vec<(&str, &str, Vec<&str>, [f64; 4])> = vec![
        (
            "Nutrition",
            "Food Parcels",
            vec!["Family Parcels", "School Packs"],
            [120.0, 60.0, 45_000.0, 480.0],
        ),
        (
            "Nutrition",
            "Community Kitchens",
            vec!["Daily Meals", "Soup Drives"],
            [400.0, 90.0, 30_000.0, 400.0],
        ),
        (
            "Healthcare",
            "Clinics",
            vec!["Checkups", "Screenings"],
            [60.0, 120.0, 52_000.0, 300.0],
        ),
        (
            "Healthcare",
            "Medical Camps",
            vec!["Eye Camps", "Dental Camps"],
            [25.0, 160.0, 80_000.0, 250.0],
        ),
        (
            "Education",
            "Schools",
            vec!["Stationery Drives", "Tutoring"],
            [80.0, 140.0, 35_000.0, 320.0],
        ),
        (
            "Education",
            "Scholarships",
            vec!["Bursaries"],
            [12.0, 30.0, 150_000.0, 12.0],
        ),
        (
            "Socioeconomic",
            "Skills Training",
            vec!["Sewing", "Computer Literacy"],
            [30.0, 200.0, 60_000.0, 90.0],
        ),
        (
            "Animal",
            "Animal Welfare",
            vec!["Sterilisation", "Feeding"],
            [90.0, 70.0, 25_000.0, 0.0],
        ),
        (
            "Disaster",
            "Disaster Relief",
            vec!["Flood Response", "Fire Response"],
            [200.0, 350.0, 120_000.0, 900.0],
        ),
        (
            "Environmental",
            "Greening",
            vec!["Tree Planting", "Clean-ups"],
            [500.0, 110.0, 18_000.0, 150.0],
        ),
    ];

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    // Two title rows above the real header, as the form export produces.
    sheet.write_string(0, 0, "Master Data set v13 - Form - 20250731")?;
    sheet.write_string(1, 0, "All projects captured via the field form")?;

    for (col, header) in HEADERS.iter().enumerate() {
        sheet.write_string(2, col as u16, *header)?;
    }
    // Stray columns the loader must ignore: a pasted index header and a
    // free-text notes column.
    sheet.write_string(2, 9, "14")?;
    sheet.write_string(2, 10, "Internal Notes")?;

    let mut row: u32 = 3;
    let mut written: u32 = 0;

    for (level1, level2, level3_pool, base) in &programmes {
        for year in YEARS {
            let repeats = 1 + (rng.next_u64() % 3) as u32;
            for _ in 0..repeats {
                let level3 = *rng.pick(level3_pool);
                let province = *rng.pick(&PROVINCES);

                let quantity = (base[0] * (0.5 + rng.next_f64())).round();
                let hours = rng.gauss(base[1], base[1] * 0.25).max(0.0).round();
                let value = (base[2] * (0.5 + rng.next_f64())).round();
                let souls = (base[3] * (0.5 + rng.next_f64())).round();

                sheet.write_string(row, 0, *level1)?;
                sheet.write_string(row, 1, *level2)?;
                sheet.write_string(row, 2, level3)?;

                // Sprinkle in the data-entry mistakes the cleaner handles:
                // missing provinces, text where numbers belong, junk years.
                if written % 31 != 30 {
                    sheet.write_string(row, 3, province)?;
                }
                if written % 47 == 46 {
                    sheet.write_string(row, 4, "TBD")?;
                } else {
                    sheet.write_number(row, 4, year)?;
                }
                if written % 23 == 22 {
                    sheet.write_string(row, 5, "TBC")?;
                } else {
                    sheet.write_number(row, 5, quantity)?;
                }
                sheet.write_number(row, 6, hours)?;
                sheet.write_number(row, 7, value)?;
                sheet.write_number(row, 8, souls)?;
                if written % 13 == 12 {
                    sheet.write_string(row, 10, "verify with regional office")?;
                }

                row += 1;
                written += 1;

                // One fully blank row partway down, like a deleted entry.
                if written == 60 {
                    row += 1;
                }
            }
        }
    }

    std::fs::create_dir_all("data").context("creating data directory")?;
    workbook.save(OUTPUT_PATH).context("saving workbook")?;

    println!("Wrote {written} project rows to {OUTPUT_PATH}");
    Ok(())
}

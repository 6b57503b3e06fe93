use crate::domain::distribution::DistributionTable;
use crate::domain::observation::Observation;
use crate::services::distribution_builder::{build_distribution, DistributionOptions};

pub fn observations(values: &[(i32, f64)]) -> Vec<Observation> {
    values
        .iter()
        .map(|(year, total)| Observation::new(*year, *total))
        .collect()
}

/// 2019 => 000-249 (1000.0), 2020 => 250-999 (3000.0)
pub fn two_year_table() -> DistributionTable {
    build_distribution(
        &observations(&[(2019, 1000.0), (2020, 3000.0)]),
        &DistributionOptions::default(),
    )
    .unwrap()
}

/// Monthly rows for two regions over two years, with one unparsable value.
pub const MONTHLY_CSV: &str = "\
bps_nama_kabupaten_kota,tahun,bulan,jumlah_curah_hujan,satuan
KOTA BANDUNG,2020,JANUARI,200.5,MM
KOTA BANDUNG,2020,FEBRUARI,300,MM
Kota Bandung,2019,JANUARI,100,MM
KOTA BANDUNG,2019,FEBRUARI,n/a,MM
KOTA BANDUNG,2019,MARET,150.25,MM
KABUPATEN BANDUNG,2019,JANUARI,9999,MM
KOTA BOGOR,2020,JANUARI,8888,MM
";

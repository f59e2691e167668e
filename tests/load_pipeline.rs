use std::fs;

use indicator_atlas::{
    Atlas, AtlasConfig, AtlasError, Continent, CsvDirectory, DataSource, Metric, Population, ViewParameters,
    continent_average, derived, percentile, rank_by_similarity,
};
use tempfile::TempDir;

const GDP: &str = "\
Country Name,Country Code,1999,2000,2001,2002
Chad,TCD,1,..,100,110
Kenya,KEN,2,300,320,..
North Macedonia,MKD,3,400,410,420
United States,USA,4,10000,10500,11000
World,WLD,5,50000,52000,54000
High income,HIC,6,30000,31000,32000
Mali,MLI,7,oops,200,210
";

const INTERNET: &str = "\
Country Name,Country Code,2000 [YR2000],2001 [YR2001]
Chad,TCD,0.1,0.2
Kenya,KEN,1.5,2.0
North Macedonia,MKD,20,25
United States,USA,43,49
";

const WORLD: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    {"type": "Feature", "properties": {"name": "Chad"},
     "geometry": {"type": "Polygon", "coordinates": [[[14,8],[24,8],[24,23],[14,23],[14,8]]]}},
    {"type": "Feature", "properties": {"name": "USA"},
     "geometry": {"type": "Polygon", "coordinates": [[[-125,25],[-67,25],[-67,49],[-125,49],[-125,25]]]}},
    {"type": "Feature", "properties": {"name": "Macedonia"},
     "geometry": {"type": "Polygon", "coordinates": [[[20,40],[23,40],[23,42],[20,42],[20,40]]]}}
  ]
}"#;

fn write_data() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("global_gdp.csv"), GDP).unwrap();
    fs::write(dir.path().join("internet_usage.csv"), INTERNET).unwrap();
    fs::write(dir.path().join("world.geojson"), WORLD).unwrap();
    dir
}

fn load(dir: &TempDir) -> Atlas {
    let config = AtlasConfig { data_dir: dir.path().to_path_buf(), ..AtlasConfig::default() };
    let source = CsvDirectory::from_config(&config.data_dir, &config);
    Atlas::load(&source, &config).unwrap()
}

#[test]
fn loads_files_and_skips_bad_cells() {
    let dir = write_data();
    let atlas = load(&dir);

    assert_eq!(atlas.gdp.get("Chad", 2000), None);
    assert_eq!(atlas.gdp.get("Chad", 2001), Some(100.0));
    assert_eq!(atlas.gdp.get("Chad", 1999), None);
    assert_eq!(atlas.gdp.get("Mali", 2001), Some(200.0));
    assert_eq!(atlas.internet.get("Kenya", 2001), Some(2.0));
    assert_eq!(atlas.rejected_cells, 1);
    assert_eq!(atlas.boundaries.len(), 3);
    assert_eq!((atlas.span.min, atlas.span.max), (2000, 2002));
}

#[test]
fn boundary_names_join_back_to_economic_names() {
    let dir = write_data();
    let atlas = load(&dir);
    assert_eq!(atlas.economic_name("USA", Metric::Gdp), "United States");
    assert_eq!(atlas.economic_name("Macedonia", Metric::Gdp), "North Macedonia");
    assert_eq!(atlas.economic_name("Chad", Metric::Internet), "Chad");
}

#[test]
fn continent_averages_leave_out_aggregates() {
    let dir = write_data();
    let atlas = load(&dir);
    let rows = continent_average(&atlas.gdp, &atlas.names, 2001);

    let continents: Vec<Continent> = rows.iter().map(|r| r.continent).collect();
    assert_eq!(continents, vec![Continent::Africa, Continent::Europe, Continent::NorthAmerica]);
    let africa = &rows[0];
    assert_eq!(africa.sample_count, 3);
    assert!((africa.mean - (100.0 + 320.0 + 200.0) / 3.0).abs() < 1e-9);
    assert_eq!(rows[2].mean, 10500.0);
}

#[test]
fn queries_over_loaded_data() {
    let dir = write_data();
    let atlas = load(&dir);

    assert_eq!(percentile(&atlas.internet, Population::Year(2000), 0.5).unwrap(), (1.5 + 20.0) / 2.0);

    let ranked = rank_by_similarity(&atlas.gdp, "Chad", 2001, true).unwrap();
    assert_eq!(ranked[0].country, "Mali");
    assert!(matches!(
        rank_by_similarity(&atlas.gdp, "Chad", 2000, true),
        Err(AtlasError::NoData { .. })
    ));

    let mut view = ViewParameters::new(atlas.span);
    assert!(view.set_range(2002, 2000).is_err());
    view.set_range(2001, 2002).unwrap();
    view.toggle_country("Chad");
    view.toggle_country("Kenya");
    let (start, end) = view.range();
    let slopes = derived::slope_rows(&atlas.gdp, view.selected(), start, end).unwrap();
    assert_eq!(slopes.len(), 1);
    assert_eq!(slopes[0].country, "Chad");
}

#[test]
fn missing_file_fails_the_load() {
    let dir = write_data();
    fs::remove_file(dir.path().join("world.geojson")).unwrap();
    let source = CsvDirectory::new(dir.path());
    assert!(source.boundaries().is_err());
    let config = AtlasConfig { data_dir: dir.path().to_path_buf(), ..AtlasConfig::default() };
    assert!(matches!(Atlas::load(&source, &config), Err(AtlasError::Io(_))));
}

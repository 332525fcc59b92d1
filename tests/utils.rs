extern crate ordinal_difficulty;
extern crate ndarray;

#[cfg(test)]
mod tests {
    use std::env;
    use std::fs;
    use std::path::PathBuf;
    use std::process;
    use ordinal_difficulty::analysis::*;
    use ordinal_difficulty::table::*;
    use ordinal_difficulty::utils::*;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = env::temp_dir().join(format!("ordinal_difficulty_{}_{}", name, process::id()));
        fs::create_dir_all(&dir).expect("Failed to create temporary directory");
        dir
    }

    fn write_dataset(dir: &PathBuf) -> (PathBuf, PathBuf) {
        let metadata = dir.join("metadata.csv");
        let data = dir.join("data.csv");
        fs::write(&metadata, "name,kind,preference\n\
                              price,numeric,cost\n\
                              colour,nominal,none\n").unwrap();
        fs::write(&data, "decision,price,colour\n\
                          0,10.5,red\n\
                          0,?,blue\n\
                          1,7,red\n\
                          2, 3 ,\n").unwrap();
        (metadata, data)
    }

    #[test]
    fn load_table_from_csv() {
        let dir = temp_dir("load");
        let (metadata, data) = write_dataset(&dir);

        let attributes = load_metadata(&metadata).unwrap();
        assert_eq!(attributes[0], Attribute::numeric("price", Preference::Cost));
        assert!(attributes[1].is_nominal());

        let table = load_table(&metadata, &data).unwrap();
        assert_eq!(table.n_objects(), 4);
        assert_eq!(table.n_attributes(), 2);
        assert_eq!(table.field(0, 0), Some(10.5));
        assert!(table.is_missing(1, 0));
        assert_eq!(table.field(3, 0), Some(3.));
        // Nominal values are coded by first appearance.
        assert_eq!(table.field(0, 1), Some(0.));
        assert_eq!(table.field(1, 1), Some(1.));
        assert_eq!(table.field(2, 1), Some(0.));
        assert!(table.is_missing(3, 1));
        assert_eq!(table.decision(3), 2);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn malformed_files() {
        let dir = temp_dir("malformed");
        let (metadata, _) = write_dataset(&dir);
        let data = dir.join("short.csv");
        fs::write(&data, "decision,price,colour\n0,1\n").unwrap();
        let bad_metadata = dir.join("bad_metadata.csv");
        fs::write(&bad_metadata, "name,kind,preference\nprice,ordinal,gain\n").unwrap();

        assert!(load_table(&metadata, &data).is_err());
        assert!(load_metadata(&bad_metadata).is_err());
        assert!(load_table(&metadata, dir.join("missing.csv")).is_err());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn store_results_and_samples() {
        let dir = temp_dir("store");
        let attributes = vec![Attribute::numeric("a", Preference::Gain)];
        let values = (0..12).map(|v| v as f64).collect::<Vec<_>>();
        let table = InformationTable::new(attributes,
                                          ::ndarray::Array::from_shape_vec((12, 1), values)
                                                            .unwrap(),
                                          ::ndarray::Array::from_vec(vec![0, 0, 0, 0, 0, 0,
                                                                          1, 1, 1, 1, 1, 1]))
                                     .unwrap();
        let report = analyze_table(&table, &AnalysisConfig::default()).unwrap();

        let results = dir.join("results");
        store_report(&report, &results).unwrap();
        let content = fs::read_to_string(results.join("union_vs_union_knn.csv")).unwrap();
        let lines = content.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], "index,label,minority_decision,majority_decision");
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[6], "11,SAFE,1,0");
        assert_eq!(fs::read_dir(&results).unwrap().count(), 8);

        let samples_file = dir.join("samples.csv");
        store_samples(&[vec![0, 3, 3], vec![2, 1, 0]], &samples_file).unwrap();
        assert_eq!(fs::read_to_string(&samples_file).unwrap(), "0,3,3\n2,1,0\n");

        fs::remove_dir_all(&dir).unwrap();
    }
}

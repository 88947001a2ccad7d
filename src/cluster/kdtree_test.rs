#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use crate::cluster::projection::lng_lat_to_pixel;
    use crate::cluster::{Pixel, new_kd_tree, region_query};

    fn sample_pixels() -> Vec<Pixel> {
        [
            (30.244759, 59.955982),
            (30.24472, 59.955975),
            (30.244358, 59.96698),
            (30.258387, 59.951557),
            (30.434124, 60.029499),
            (30.244759, 59.955982),
        ]
        .iter()
        .map(|&(lng, lat)| lng_lat_to_pixel(lng, lat, 14.0))
        .collect()
    }

    #[test]
    fn test_range_query_kdtree() {
        // Verify that the tree & the linear scan give the same results
        let pixels = sample_pixels();
        let tree = new_kd_tree(pixels.clone());

        for radius in [0.0, 5.0, 200.0, 5000.0] {
            for pt in &pixels {
                let mut pts1 = tree.in_range(pt, radius, Vec::new());
                let mut pts2 = region_query(&pixels, pt, radius);
                pts1.sort();
                pts2.sort();
                assert_eq!(pts1, pts2, "radius {radius}");
            }
        }
    }

    #[test]
    fn test_equal_points_are_reported_together() {
        let pixels = sample_pixels();
        let tree = new_kd_tree(pixels.clone());

        let mut found = tree.in_range(&pixels[0], 0.0, Vec::new());
        found.sort();
        assert_eq!(found, vec![0, 5]);
    }

    #[test]
    fn test_empty_tree_and_negative_radius() {
        let tree = new_kd_tree(Vec::new());
        assert_eq!(tree.height(), 0);
        assert!(tree.in_range(&Pixel([0.0, 0.0]), 10.0, Vec::new()).is_empty());

        let tree = new_kd_tree(sample_pixels());
        assert!(tree.in_range(&Pixel([0.0, 0.0]), -1.0, Vec::new()).is_empty());
    }

    #[test]
    fn test_tree_is_balanced() {
        let pixels: Vec<Pixel> = (0..1024)
            .map(|i| Pixel([(i % 32) as f64, (i / 32) as f64]))
            .collect();
        let tree = new_kd_tree(pixels);
        assert!(tree.height() <= 12, "height {}", tree.height());
    }

    quickcheck! {
        fn prop_tree_matches_linear_scan(raw: Vec<(u8, u8)>, radius: u8) -> bool {
            let pixels: Vec<Pixel> = raw
                .iter()
                .map(|&(x, y)| Pixel([x as f64, y as f64]))
                .collect();
            let radius = radius as f64 / 4.0;
            let tree = new_kd_tree(pixels.clone());

            pixels.iter().all(|pt| {
                let mut a = tree.in_range(pt, radius, Vec::new());
                let mut b = region_query(&pixels, pt, radius);
                a.sort_unstable();
                b.sort_unstable();
                a == b
            })
        }
    }
}

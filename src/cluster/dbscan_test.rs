#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use crate::cluster::test_support::{member_ids, point_at_pixel};
    use crate::cluster::{GeoPoint, neighbor_merge, pixel_distance};
    use crate::error::Error;

    const ZOOM: f64 = 8.0;
    const X0: f64 = 33_768.0;
    const Y0: f64 = 21_000.0;

    fn row_of_points(offsets: &[f64]) -> Vec<GeoPoint> {
        offsets
            .iter()
            .enumerate()
            .map(|(i, dx)| point_at_pixel(X0 + dx, Y0, ZOOM, i.to_string()))
            .collect()
    }

    #[test]
    fn test_two_close_one_far() {
        let points = vec![
            GeoPoint::new(0.0, 51.5, "A"),
            GeoPoint::new(0.0001, 51.5, "B"),
            GeoPoint::new(10.0, 40.0, "C"),
        ];
        let centroids = neighbor_merge(points, 20.0, ZOOM).unwrap();

        assert_eq!(centroids.len(), 2);
        assert_eq!(centroids[0].id(), "C-1");
        assert_eq!(centroids[0].point_count(), 2);
        assert_eq!(member_ids(&centroids[0]), ["A", "B"]);
        assert_eq!(centroids[0].point_list(), "P-A, P-B, ");
        assert_eq!(centroids[1].id(), "C-2");
        assert_eq!(centroids[1].point_count(), 1);
        assert_eq!(member_ids(&centroids[1]), ["C"]);
    }

    #[test]
    fn test_not_transitive() {
        // 1 is within eps of both 0 and 2, but 2 is not within eps of 0
        let centroids = neighbor_merge(row_of_points(&[0.0, 15.0, 30.0]), 20.0, ZOOM).unwrap();

        assert_eq!(centroids.len(), 2);
        assert_eq!(member_ids(&centroids[0]), ["0", "1"]);
        assert_eq!(member_ids(&centroids[1]), ["2"]);
    }

    #[test]
    fn test_input_order_matters() {
        let centroids = neighbor_merge(row_of_points(&[30.0, 15.0, 0.0]), 20.0, ZOOM).unwrap();

        // The first visited point is now the far end of the row
        assert_eq!(centroids.len(), 2);
        assert_eq!(member_ids(&centroids[0]), ["0", "1"]);
        assert_eq!(member_ids(&centroids[1]), ["2"]);
        assert_eq!(centroids[0].center(), centroids[0].members()[0].coordinates);
        assert_eq!(centroids[0].members()[0].id(), "0");
    }

    #[test]
    fn test_assigned_points_stay_put() {
        // 2 is closer to 1 than 0 is, but 1 was already taken by 0
        let centroids =
            neighbor_merge(row_of_points(&[0.0, 19.0, 30.0, 60.0]), 20.0, ZOOM).unwrap();

        assert_eq!(centroids.len(), 3);
        assert_eq!(member_ids(&centroids[0]), ["0", "1"]);
        assert_eq!(member_ids(&centroids[1]), ["2"]);
        assert_eq!(member_ids(&centroids[2]), ["3"]);
    }

    #[test]
    fn test_eps_is_inclusive() {
        let p = point_at_pixel(X0, Y0, ZOOM, "p");
        let q = point_at_pixel(X0 + 12.0, Y0 + 9.0, ZOOM, "q");
        let eps = pixel_distance(&p, &q, ZOOM);

        let centroids = neighbor_merge(vec![p.clone(), q.clone()], eps, ZOOM).unwrap();
        assert_eq!(centroids.len(), 1);
        assert_eq!(centroids[0].point_count(), 2);

        let centroids = neighbor_merge(vec![p, q], eps * 0.999, ZOOM).unwrap();
        assert_eq!(centroids.len(), 2);
    }

    #[test]
    fn test_duplicate_points_share_cluster() {
        let points = vec![
            GeoPoint::new(2.0, 48.0, "a"),
            GeoPoint::new(2.0, 48.0, "b"),
            GeoPoint::new(2.0, 48.0, "c"),
        ];
        let centroids = neighbor_merge(points, 20.0, ZOOM).unwrap();

        assert_eq!(centroids.len(), 1);
        assert_eq!(member_ids(&centroids[0]), ["a", "b", "c"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(neighbor_merge(Vec::new(), 20.0, ZOOM).unwrap().is_empty());
    }

    #[test]
    fn test_rejects_degenerate_input() {
        let points = || vec![GeoPoint::new(2.0, 48.0, "a")];

        assert!(matches!(
            neighbor_merge(points(), 0.0, ZOOM),
            Err(Error::InvalidParameter { name: "eps", .. })
        ));
        assert!(neighbor_merge(points(), -5.0, ZOOM).is_err());
        assert!(neighbor_merge(points(), f64::NAN, ZOOM).is_err());
        assert!(matches!(
            neighbor_merge(points(), 20.0, f64::INFINITY),
            Err(Error::InvalidParameter { name: "zoom", .. })
        ));
        assert!(matches!(
            neighbor_merge(vec![GeoPoint::new(f64::NAN, 48.0, "x")], 20.0, ZOOM),
            Err(Error::NonFiniteProjection { .. })
        ));
    }

    fn scatter(raw: &[(u16, u16)]) -> Vec<GeoPoint> {
        raw.iter()
            .enumerate()
            .map(|(i, &(a, b))| {
                let lng = a as f64 / u16::MAX as f64 * 4.0;
                let lat = 45.0 + b as f64 / u16::MAX as f64 * 4.0;
                GeoPoint::new(lng, lat, i)
            })
            .collect()
    }

    quickcheck! {
        fn prop_partitions_input(raw: Vec<(u16, u16)>) -> bool {
            let points = scatter(&raw);
            let centroids = neighbor_merge(points, 20.0, 6.0).unwrap();

            let mut seen: Vec<usize> = centroids
                .iter()
                .flat_map(|c| c.members().iter().map(|p| p.id().parse::<usize>().unwrap()))
                .collect();
            seen.sort_unstable();

            centroids.iter().all(|c| c.point_count() == c.members().len() && c.point_count() >= 1)
                && seen == (0..raw.len()).collect::<Vec<_>>()
        }

        fn prop_first_point_takes_its_neighbors(raw: Vec<(u16, u16)>) -> bool {
            let points = scatter(&raw);
            let Some(first) = points.first().cloned() else {
                return true;
            };
            let expected = points
                .iter()
                .filter(|q| pixel_distance(&first, *q, 6.0) <= 20.0)
                .count();

            let centroids = neighbor_merge(points, 20.0, 6.0).unwrap();
            centroids[0].point_count() == expected
        }
    }
}

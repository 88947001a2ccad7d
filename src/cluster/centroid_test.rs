#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::cluster::{Centroid, FeatureCollection, GeoPoint, LngLat};

    #[test]
    fn test_new_centroid() {
        let c = Centroid::new("1", GeoPoint::new(30.244759, 59.955982, "A"));

        assert_eq!(c.point_count(), 1);
        assert_eq!(c.members().len(), 1);
        assert_eq!(c.id(), "C-1");
        assert_eq!(c.label(), "1");
        assert_eq!(c.point_list(), "P-A, ");
        assert_eq!(c.center(), [30.244759, 59.955982]);
    }

    #[test]
    fn test_add_points_keeps_count_and_order() {
        let mut c = Centroid::new("3-4", GeoPoint::new(1.0, 2.0, "A"));
        c.add_point(GeoPoint::new(1.5, 2.5, 7));
        c.add_points(vec![GeoPoint::new(3.0, 4.0, "C"), GeoPoint::new(3.0, 4.0, "C")]);

        assert_eq!(c.point_count(), 4);
        assert_eq!(c.point_count(), c.members().len());
        assert_eq!(c.point_list(), "P-A, P-7, P-C, P-C, ");
        let ids: Vec<String> = c.members().iter().map(GeoPoint::id).collect();
        assert_eq!(ids, ["A", "7", "C", "C"]);
        // Center stays on the first member
        assert_eq!((c.lng(), c.lat()), (1.0, 2.0));
    }

    #[test]
    fn test_drain_members() {
        let mut c = Centroid::new("1", GeoPoint::new(1.0, 2.0, "A"));
        c.add_point(GeoPoint::new(1.0, 2.1, "B"));

        let moved = c.drain_members();
        assert_eq!(moved.len(), 2);
        assert!(c.is_empty());
        assert_eq!(c.point_count(), 0);
        assert_eq!(c.point_list(), "");
    }

    #[test]
    fn test_set_center() {
        let mut c = Centroid::new("1", GeoPoint::new(1.0, 2.0, "A"));
        c.set_center(5.0, 6.0);
        assert_eq!(c.center(), [5.0, 6.0]);
        assert_eq!(c.members()[0].coordinates, [1.0, 2.0]);
    }

    #[test]
    fn test_point_equality_ignores_properties() {
        assert_eq!(GeoPoint::new(1.0, 2.0, "A"), GeoPoint::new(1.0, 2.0, "B"));
        assert_ne!(GeoPoint::new(1.0, 2.0, "A"), GeoPoint::new(1.0, 2.000001, "A"));
    }

    #[test]
    fn test_serialize_feature_collection() {
        let mut c = Centroid::new("1", GeoPoint::new(0.0, 51.5, "A"));
        c.add_point(GeoPoint::new(0.0001, 51.5, "B"));

        let value = serde_json::to_value(FeatureCollection::new(vec![c])).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "FeatureCollection",
                "features": [{
                    "type": "Feature",
                    "geometry": { "type": "Point", "coordinates": [0.0, 51.5] },
                    "properties": { "id": "C-1", "pointcount": 2, "pointlist": "P-A, P-B, " }
                }]
            })
        );
    }
}

//! Unit tests for campus-spatial.
//!
//! All tests use hand-crafted line features so they run without any data file.

#[cfg(test)]
mod helpers {
    use campus_core::{Coordinate, EARTH_RADIUS_M};
    use crate::{LineFeature, RoadNetwork, RoadNetworkBuilder};

    /// Degrees of latitude spanning `m` metres along a meridian.
    pub fn deg(m: f64) -> f64 {
        (m / EARTH_RADIUS_M).to_degrees()
    }

    /// Point `north_m` metres north of the origin on the prime meridian.
    pub fn north(north_m: f64) -> Coordinate {
        Coordinate::new(0.0, deg(north_m))
    }

    pub fn build(features: &[LineFeature]) -> RoadNetwork {
        let mut b = RoadNetworkBuilder::new();
        b.add_features(features);
        b.build()
    }

    /// Small campus-like network.
    ///
    /// ```text
    ///   d ── e
    ///   │     ╲
    ///   a ── b ── c        f ── g   (separate component)
    /// ```
    ///
    /// `a-b-c` is one road; `a-d-e-c` is a longer detour made of two roads
    /// that meet at `d`.  `f-g` is not connected to anything else.
    pub fn campus() -> (RoadNetwork, [Coordinate; 7]) {
        let a = Coordinate::new(108.900_000, 34.370_000);
        let b = Coordinate::new(108.901_000, 34.370_000);
        let c = Coordinate::new(108.902_000, 34.370_000);
        let d = Coordinate::new(108.900_000, 34.371_000);
        let e = Coordinate::new(108.901_000, 34.371_000);
        let f = Coordinate::new(108.910_000, 34.380_000);
        let g = Coordinate::new(108.911_000, 34.380_000);

        let net = build(&[
            LineFeature::line("south-road", vec![a, b, c]),
            LineFeature::line("west-road", vec![a, d]),
            LineFeature::line("north-road", vec![d, e, c]),
            LineFeature::line("lab-spur", vec![f, g]),
        ]);
        (net, [a, b, c, d, e, f, g])
    }
}

// ── Graph builder ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use campus_core::{Coordinate, EngineConfig, LocatorKind, MAX_COORDINATE_PRECISION};
    use rand::rngs::SmallRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    use super::helpers::{build, campus, north};
    use crate::{shortest_path, LineFeature, RoadNetwork, RoadNetworkBuilder};

    #[test]
    fn empty_build() {
        let net = RoadNetworkBuilder::new().build();
        assert_eq!(net.vertex_count(), 0);
        assert_eq!(net.edge_count(), 0);
        assert!(net.is_empty());
        assert!(build(&[]).is_empty());
    }

    #[test]
    fn open_line_has_n_minus_one_edges() {
        let coords: Vec<_> = (0..5).map(|i| north(i as f64 * 50.0)).collect();
        let net = build(&[LineFeature::line("r1", coords)]);
        assert_eq!(net.vertex_count(), 5);
        assert_eq!(net.edge_count(), 4);
        assert_eq!(net.arc_count(), 8);
    }

    #[test]
    fn closed_loop_has_n_edges() {
        let ring = vec![
            Coordinate::new(108.900, 34.370),
            Coordinate::new(108.901, 34.370),
            Coordinate::new(108.901, 34.371),
            Coordinate::new(108.900, 34.371),
            Coordinate::new(108.900, 34.370),
        ];
        let net = build(&[LineFeature::line("loop", ring)]);
        assert_eq!(net.vertex_count(), 4);
        assert_eq!(net.edge_count(), 4);
        for v in 0..4 {
            assert_eq!(net.out_degree(campus_core::VertexId(v)), 2);
        }
    }

    #[test]
    fn coincident_endpoints_merge() {
        let shared_a = Coordinate::new(108.905_000_1, 34.372_000_2);
        let shared_b = Coordinate::new(108.905_000_3, 34.371_999_9);
        let net = build(&[
            LineFeature::line("r1", vec![Coordinate::new(108.904, 34.372), shared_a]),
            LineFeature::line("r2", vec![shared_b, Coordinate::new(108.906, 34.372)]),
        ]);
        assert_eq!(net.vertex_count(), 3);
        assert_eq!(net.edge_count(), 2);

        let hub = net.vertex_at(shared_b).unwrap();
        assert_eq!(net.out_degree(hub), 2);
        // First raw coordinate seen is kept as the vertex position.
        assert_eq!(net.vertex_pos(hub), shared_a);
    }

    #[test]
    fn multi_line_parts_are_not_stitched() {
        let net = build(&[LineFeature::multi_line(
            "split-road",
            vec![
                vec![north(0.0), north(100.0)],
                vec![north(200.0), north(300.0)],
            ],
        )]);
        assert_eq!(net.vertex_count(), 4);
        assert_eq!(net.edge_count(), 2);
        let gap_start = net.vertex_at(north(100.0)).unwrap();
        assert_eq!(net.out_degree(gap_start), 1);
    }

    #[test]
    fn multi_line_parts_join_at_shared_vertex() {
        let net = build(&[LineFeature::multi_line(
            "y-junction",
            vec![
                vec![north(0.0), north(100.0)],
                vec![north(100.0), Coordinate::new(0.001, 0.0)],
            ],
        )]);
        assert_eq!(net.vertex_count(), 3);
        assert_eq!(net.out_degree(net.vertex_at(north(100.0)).unwrap()), 2);
    }

    #[test]
    fn single_coordinate_line_contributes_nothing() {
        let net = build(&[
            LineFeature::line("stub", vec![north(0.0)]),
            LineFeature::line("empty", vec![]),
        ]);
        assert!(net.is_empty());
        assert_eq!(net.edge_count(), 0);
    }

    #[test]
    fn malformed_feature_does_not_abort_build() {
        let net = build(&[
            LineFeature::line("stub", vec![north(0.0)]),
            LineFeature::line("good", vec![north(10.0), north(20.0)]),
            LineFeature::line("nan", vec![north(30.0), Coordinate::new(f64::NAN, 0.0)]),
        ]);
        assert_eq!(net.edge_count(), 1);
    }

    #[test]
    fn zero_length_segment_creates_no_self_loop() {
        let p = Coordinate::new(108.900_000_1, 34.370_000_1);
        let q = Coordinate::new(108.900_000_2, 34.370_000_2);
        let net = build(&[LineFeature::line("degenerate", vec![p, q])]);
        assert_eq!(net.vertex_count(), 0);
        assert_eq!(net.edge_count(), 0);
    }

    #[test]
    fn zero_length_stub_does_not_capture_snaps() {
        let net = build(&[
            LineFeature::line("road", vec![north(0.0), north(100.0)]),
            LineFeature::line("stub", vec![north(50.0), north(50.0)]),
        ]);
        assert_eq!(net.vertex_count(), 2);
        let snapped = net.locate(north(50.0)).unwrap();
        assert_eq!(net.out_degree(snapped), 1);

        let route = shortest_path(&net, north(49.0), north(100.0)).unwrap();
        assert_eq!(route.len(), 2);
    }

    #[test]
    fn oversized_precision_is_clamped() {
        let mut b = RoadNetworkBuilder::with_precision(400);
        let tag = b.register_feature("r");
        assert!(b.add_segment(north(0.0), north(1.0), tag));
        assert_eq!(b.vertex_count(), 2);
        assert_eq!(b.arc_count(), 2);
        let net = b.build();
        assert_eq!(net.precision(), MAX_COORDINATE_PRECISION);

        let config = EngineConfig { coordinate_precision: 400, ..EngineConfig::default() };
        let net = RoadNetwork::from_features(
            &[LineFeature::line("r", vec![north(0.0), north(1.0), north(2.0)])],
            &config,
        );
        assert_eq!(net.vertex_count(), 3);
        assert_eq!(net.edge_count(), 2);
    }

    #[test]
    fn attributes_ride_along_without_affecting_the_graph() {
        let plain = LineFeature::multi_line("r", vec![
            vec![north(0.0), north(10.0)],
            vec![north(10.0), north(20.0), north(30.0)],
        ]);
        let tagged = plain
            .clone()
            .with_attribute("highway", "footway")
            .with_attribute("surface", "paved");
        assert_eq!(tagged.geometry.coordinate_count(), 5);
        assert_eq!(tagged.attributes.len(), 2);
        assert_eq!(tagged.attributes["highway"], "footway");
        assert_eq!(build(&[tagged]).weighted_edges(), build(&[plain]).weighted_edges());
    }

    #[test]
    fn duplicate_segment_is_noop() {
        let mut b = RoadNetworkBuilder::new();
        let f1 = b.register_feature("first");
        let f2 = b.register_feature("second");
        assert!(b.add_segment(north(0.0), north(100.0), f1));
        assert!(!b.add_segment(north(0.0), north(100.0), f2));
        assert!(!b.add_segment(north(100.0), north(0.0), f2));
        let net = b.build();
        assert_eq!(net.edge_count(), 1);
        // First insertion wins, including its provenance.
        for e in net.out_edges(campus_core::VertexId(0)) {
            assert_eq!(net.feature_tag(e), "first");
        }
    }

    #[test]
    fn edges_are_symmetric_with_equal_weight() {
        let (net, _) = campus();
        for v in 0..net.vertex_count() {
            let v = campus_core::VertexId(v as u32);
            for (u, w) in net.neighbors(v) {
                let back = net.neighbors(u).find(|&(x, _)| x == v);
                assert_eq!(back, Some((v, w)));
            }
        }
    }

    #[test]
    fn edge_weight_is_haversine_length() {
        let net = build(&[LineFeature::line("r", vec![north(0.0), north(120.0)])]);
        let (_, w) = net.neighbors(campus_core::VertexId(0)).next().unwrap();
        assert!((w - 120.0).abs() < 1e-6, "got {w}");
    }

    #[test]
    fn provenance_is_recorded_per_edge() {
        let (net, [a, b, _, d, ..]) = campus();
        let va = net.vertex_at(a).unwrap();
        for e in net.out_edges(va) {
            let to = net.edge_to[e.index()];
            let expected = if to == net.vertex_at(b).unwrap() {
                "south-road"
            } else {
                assert_eq!(to, net.vertex_at(d).unwrap());
                "west-road"
            };
            assert_eq!(net.feature_tag(e), expected);
        }
    }

    #[test]
    fn rebuild_from_shuffled_input_is_isomorphic() {
        let (reference, _) = campus();
        let mut features = vec![
            LineFeature::line("south-road", vec![
                Coordinate::new(108.900, 34.370),
                Coordinate::new(108.901, 34.370),
                Coordinate::new(108.902, 34.370),
            ]),
            LineFeature::line("west-road", vec![
                Coordinate::new(108.900, 34.370),
                Coordinate::new(108.900, 34.371),
            ]),
            LineFeature::line("north-road", vec![
                Coordinate::new(108.900, 34.371),
                Coordinate::new(108.901, 34.371),
                Coordinate::new(108.902, 34.370),
            ]),
            LineFeature::line("lab-spur", vec![
                Coordinate::new(108.910, 34.380),
                Coordinate::new(108.911, 34.380),
            ]),
        ];
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..5 {
            features.shuffle(&mut rng);
            let net = RoadNetwork::from_features(&features, &EngineConfig::default());
            assert_eq!(net.vertex_count(), reference.vertex_count());
            assert_eq!(net.weighted_edges(), reference.weighted_edges());
        }
    }

    #[test]
    fn config_controls_precision_and_locator() {
        let config = EngineConfig {
            coordinate_precision: 3,
            locator: LocatorKind::SpatialIndex,
            ..EngineConfig::default()
        };
        let net = RoadNetwork::from_features(
            &[LineFeature::line("r", vec![
                Coordinate::new(108.900_1, 34.370),
                Coordinate::new(108.900_2, 34.370),
                Coordinate::new(108.905, 34.370),
            ])],
            &config,
        );
        assert_eq!(net.precision(), 3);
        assert!(net.has_spatial_index());
        // The first two points collapse at three decimals.
        assert_eq!(net.vertex_count(), 2);
        assert_eq!(net.edge_count(), 1);
    }
}

// ── Nearest-vertex locator ────────────────────────────────────────────────────

#[cfg(test)]
mod locate {
    use campus_core::{Coordinate, LocatorKind, VertexId};

    use super::helpers::{campus, north};
    use crate::{LineFeature, RoadNetwork, RoadNetworkBuilder};

    #[test]
    fn empty_network_returns_none() {
        let net = RoadNetwork::empty();
        assert!(net.locate(Coordinate::new(108.9, 34.37)).is_none());
        assert!(net.locate_linear(Coordinate::new(0.0, 0.0)).is_none());
    }

    #[test]
    fn exact_position() {
        let (net, [_, b, ..]) = campus();
        assert_eq!(net.locate(b), net.vertex_at(b));
    }

    #[test]
    fn nearest_by_distance() {
        let (net, [a, b, ..]) = campus();
        // 0.4 of the way from a to b is closer to a; 0.6 is closer to b.
        let near_a = Coordinate::new(108.900_4, 34.370_02);
        let near_b = Coordinate::new(108.900_6, 34.370_02);
        assert_eq!(net.locate(near_a), net.vertex_at(a));
        assert_eq!(net.locate(near_b), net.vertex_at(b));
    }

    #[test]
    fn ties_keep_first_vertex() {
        let mut b = RoadNetworkBuilder::new();
        b.add_feature(&LineFeature::line("r", vec![north(-100.0), north(100.0)]));
        let net = b.build();
        // The origin is equidistant from both vertices.
        assert_eq!(net.locate_linear(north(0.0)), Some(VertexId(0)));
    }

    #[test]
    fn far_away_point_still_snaps() {
        let (net, _) = campus();
        assert!(net.locate(Coordinate::new(-70.0, -30.0)).is_some());
    }

    #[test]
    fn spatial_index_agrees_with_linear_scan() {
        let (linear, coords) = campus();
        let mut b = RoadNetworkBuilder::new().locator(LocatorKind::SpatialIndex);
        b.add_feature(&LineFeature::line("south-road", vec![coords[0], coords[1], coords[2]]));
        b.add_feature(&LineFeature::line("west-road", vec![coords[0], coords[3]]));
        b.add_feature(&LineFeature::line("north-road", vec![coords[3], coords[4], coords[2]]));
        b.add_feature(&LineFeature::line("lab-spur", vec![coords[5], coords[6]]));
        let indexed = b.build();
        assert!(indexed.has_spatial_index());
        assert_eq!(indexed.spatial_index().map(|i| i.len()), Some(7));

        let queries = [
            Coordinate::new(108.900_3, 34.370_1),
            Coordinate::new(108.901_8, 34.370_9),
            Coordinate::new(108.909_0, 34.379_0),
            Coordinate::new(108.950_0, 34.400_0),
        ];
        for p in queries {
            let a = linear.locate(p).map(|v| linear.vertex_key[v.index()]);
            let b = indexed.locate(p).map(|v| indexed.vertex_key[v.index()]);
            assert_eq!(a, b, "disagreement at {p}");
        }
    }

    #[test]
    fn k_nearest_is_sorted() {
        let mut b = RoadNetworkBuilder::new().locator(LocatorKind::SpatialIndex);
        b.add_feature(&LineFeature::line("r", vec![north(0.0), north(100.0), north(300.0)]));
        let net = b.build();
        let idx = net.spatial_index().unwrap();
        let nearest = idx.k_nearest(north(90.0), 3);
        assert_eq!(nearest, vec![VertexId(1), VertexId(0), VertexId(2)]);
    }

    #[test]
    fn locate_with_distance_reports_snap_gap() {
        let (net, [a, ..]) = campus();
        let (v, gap) = net.locate_with_distance(a).unwrap();
        assert_eq!(Some(v), net.vertex_at(a));
        assert!(gap < 1e-6);
    }
}

// ── Shortest-path routing ─────────────────────────────────────────────────────

#[cfg(test)]
mod routing {
    use std::time::Duration;

    use campus_core::{Coordinate, VertexId};

    use super::helpers::{build, campus, north};
    use crate::{
        plan_route, shortest_path, CancelToken, DijkstraRouter, LineFeature, RoadNetwork, Router,
        SpatialError,
    };

    #[test]
    fn same_point_is_single_vertex_route() {
        let (net, [a, ..]) = campus();
        let r = shortest_path(&net, a, a).unwrap();
        assert!(r.is_trivial());
        assert_eq!(r.len(), 1);
        assert_eq!(r.coordinates, vec![a]);
        assert_eq!(r.distance_m, 0.0);
    }

    #[test]
    fn three_vertex_path_sums_weights() {
        let (a, b, c) = (north(0.0), north(100.0), north(250.0));
        let net = build(&[
            LineFeature::line("ab", vec![a, b]),
            LineFeature::line("bc", vec![b, c]),
        ]);
        let r = shortest_path(&net, a, c).unwrap();
        assert_eq!(r.coordinates, vec![a, b, c]);
        assert!((r.distance_m - 250.0).abs() < 1e-6, "got {}", r.distance_m);
    }

    #[test]
    fn prefers_shorter_of_two_paths() {
        let (net, [a, b, c, ..]) = campus();
        let r = shortest_path(&net, a, c).unwrap();
        assert_eq!(r.coordinates, vec![a, b, c]);
        let direct = a.distance_m(b) + b.distance_m(c);
        assert!((r.distance_m - direct).abs() < 1e-9);
        assert_eq!(r.feature_tags(&net), vec!["south-road"]);
    }

    #[test]
    fn crosses_between_features_through_shared_vertex() {
        let (net, [a, _, _, d, e, ..]) = campus();
        let r = shortest_path(&net, a, e).unwrap();
        assert_eq!(r.coordinates, vec![a, d, e]);
        assert_eq!(r.feature_tags(&net), vec!["west-road", "north-road"]);
    }

    #[test]
    fn route_is_symmetric_in_cost() {
        let (net, [_, b, _, _, e, ..]) = campus();
        let there = shortest_path(&net, b, e).unwrap();
        let back  = shortest_path(&net, e, b).unwrap();
        assert!((there.distance_m - back.distance_m).abs() < 1e-9);
    }

    #[test]
    fn snaps_arbitrary_coordinates() {
        let (net, [a, _, c, ..]) = campus();
        let start = Coordinate::new(108.900_05, 34.369_95);
        let end   = Coordinate::new(108.902_05, 34.370_05);
        let r = shortest_path(&net, start, end).unwrap();
        assert_eq!(r.coordinates.first(), Some(&a));
        assert_eq!(r.coordinates.last(), Some(&c));
    }

    #[test]
    fn disconnected_components_return_none() {
        let (net, [a, _, _, _, _, f, _]) = campus();
        assert!(shortest_path(&net, a, f).is_none());
    }

    #[test]
    fn empty_network_returns_none() {
        let net = RoadNetwork::empty();
        let r = plan_route(&net, &DijkstraRouter, north(0.0), north(1.0), &CancelToken::new());
        assert!(matches!(r, Ok(None)));
    }

    #[test]
    fn unknown_vertex_is_an_error() {
        let (net, _) = campus();
        let r = DijkstraRouter.route(&net, VertexId(0), VertexId(999), &CancelToken::new());
        assert!(matches!(r, Err(SpatialError::VertexNotFound(VertexId(999)))));
    }

    #[test]
    fn cancelled_token_aborts_search() {
        let (net, [a, _, c, ..]) = campus();
        let token = CancelToken::new();
        token.cancel();
        let r = plan_route(&net, &DijkstraRouter, a, c, &token);
        assert!(matches!(r, Err(SpatialError::Cancelled)));
    }

    #[test]
    fn expired_deadline_times_out() {
        let (net, [a, _, c, ..]) = campus();
        let token = CancelToken::with_timeout(Duration::ZERO);
        let r = plan_route(&net, &DijkstraRouter, a, c, &token);
        assert!(matches!(r, Err(SpatialError::TimedOut { limit_ms: 0 })));
    }

    #[test]
    fn trivial_route_ignores_cancellation() {
        let (net, [a, ..]) = campus();
        let token = CancelToken::new();
        token.cancel();
        let r = plan_route(&net, &DijkstraRouter, a, a, &token).unwrap();
        assert!(r.unwrap().is_trivial());
    }

    #[test]
    fn route_vertices_edges_and_coordinates_line_up() {
        let (net, [a, _, _, _, e, ..]) = campus();
        let r = shortest_path(&net, a, e).unwrap();
        assert_eq!(r.edges.len() + 1, r.vertices.len());
        for (i, edge) in r.edges.iter().enumerate() {
            assert_eq!(net.edge_from[edge.index()], r.vertices[i]);
            assert_eq!(net.edge_to[edge.index()], r.vertices[i + 1]);
        }
        let summed: f64 = r.edges.iter().map(|e| net.edge_length_m[e.index()]).sum();
        assert!((summed - r.distance_m).abs() < 1e-9);
        assert!((r.distance_km() - r.distance_m / 1_000.0).abs() < 1e-12);
    }

    #[test]
    fn matches_brute_force_on_grid() {
        // 4×4 grid with one missing link; compare against Floyd–Warshall.
        let side = 4;
        let p = |i: usize, j: usize| Coordinate::new(108.9 + i as f64 * 0.001, 34.37 + j as f64 * 0.0007);
        let mut features = Vec::new();
        for i in 0..side {
            features.push(LineFeature::line(format!("col-{i}"), (0..side).map(|j| p(i, j)).collect()));
        }
        for j in 0..side {
            if j == 2 {
                features.push(LineFeature::line("row-2-west", vec![p(0, 2), p(1, 2)]));
                features.push(LineFeature::line("row-2-east", vec![p(2, 2), p(3, 2)]));
                continue;
            }
            features.push(LineFeature::line(format!("row-{j}"), (0..side).map(|i| p(i, j)).collect()));
        }
        let net = build(&features);
        let n = net.vertex_count();

        let mut dist = vec![vec![f64::INFINITY; n]; n];
        for v in 0..n {
            dist[v][v] = 0.0;
            for (u, w) in net.neighbors(VertexId(v as u32)) {
                dist[v][u.index()] = w;
            }
        }
        for k in 0..n {
            for i in 0..n {
                for j in 0..n {
                    if dist[i][k] + dist[k][j] < dist[i][j] {
                        dist[i][j] = dist[i][k] + dist[k][j];
                    }
                }
            }
        }

        for i in 0..n {
            for j in 0..n {
                let r = DijkstraRouter
                    .route(&net, VertexId(i as u32), VertexId(j as u32), &CancelToken::new())
                    .unwrap()
                    .unwrap();
                assert!((r.distance_m - dist[i][j]).abs() < 1e-6);
            }
        }
    }
}

// ── GeoJSON ───────────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "geojson"))]
mod geojson {
    use campus_core::Coordinate;

    use crate::geojson::parse_features;
    use crate::{shortest_path, LineGeometry, RoadNetworkBuilder, SpatialError};

    const ROADS: &str = r#"{
      "type": "FeatureCollection",
      "features": [
        { "type": "Feature",
          "properties": { "id": "r1", "highway": "service", "lanes": 2 },
          "geometry": { "type": "LineString",
                        "coordinates": [[108.900, 34.370], [108.901, 34.370]] } },
        { "type": "Feature",
          "properties": { "name": "no id" },
          "geometry": { "type": "MultiLineString",
                        "coordinates": [[[108.901, 34.370], [108.902, 34.370]],
                                        [[108.905, 34.375], [108.906, 34.375, 12.0]]] } },
        { "type": "Feature",
          "properties": { "id": 17, "building": "yes" },
          "geometry": { "type": "Polygon",
                        "coordinates": [[[0, 0], [1, 0], [1, 1], [0, 0]]] } },
        { "type": "Feature", "properties": null, "geometry": null }
      ]
    }"#;

    #[test]
    fn keeps_only_line_features() {
        let lines = parse_features(ROADS).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].id, "r1");
        assert_eq!(lines[0].attributes.get("highway").map(String::as_str), Some("service"));
        assert_eq!(lines[0].attributes.get("lanes").map(String::as_str), Some("2"));
        assert_eq!(lines[1].id, "unknown");
        assert!(matches!(lines[1].geometry, LineGeometry::MultiLine(ref p) if p.len() == 2));
    }

    #[test]
    fn elevation_component_is_ignored() {
        let lines = parse_features(ROADS).unwrap();
        let parts = lines[1].geometry.parts();
        assert_eq!(parts[1][1], Coordinate::new(108.906, 34.375));
    }

    #[test]
    fn numeric_id_is_stringified() {
        let text = r#"{ "type": "Feature", "properties": { "id": 42 },
            "geometry": { "type": "LineString", "coordinates": [[0, 0], [0, 0.001]] } }"#;
        let lines = parse_features(text).unwrap();
        assert_eq!(lines[0].id, "42");
    }

    #[test]
    fn truthy_ids_are_kept_and_falsy_ids_are_unknown() {
        let text = r#"{ "type": "FeatureCollection", "features": [
            { "type": "Feature", "properties": { "id": true },
              "geometry": { "type": "LineString", "coordinates": [[0, 0], [0, 0.001]] } },
            { "type": "Feature", "properties": { "id": ["a", 1] },
              "geometry": { "type": "LineString", "coordinates": [[0, 0], [0, 0.001]] } },
            { "type": "Feature", "properties": { "id": { "ref": "x" } },
              "geometry": { "type": "LineString", "coordinates": [[0, 0], [0, 0.001]] } },
            { "type": "Feature", "properties": { "id": false },
              "geometry": { "type": "LineString", "coordinates": [[0, 0], [0, 0.001]] } },
            { "type": "Feature", "properties": { "id": 0 },
              "geometry": { "type": "LineString", "coordinates": [[0, 0], [0, 0.001]] } },
            { "type": "Feature", "properties": { "id": "" },
              "geometry": { "type": "LineString", "coordinates": [[0, 0], [0, 0.001]] } }
        ] }"#;
        let ids: Vec<String> = parse_features(text).unwrap().into_iter().map(|f| f.id).collect();
        assert_eq!(ids, [
            "true",
            r#"["a",1]"#,
            r#"{"ref":"x"}"#,
            "unknown",
            "unknown",
            "unknown",
        ]);
    }

    #[test]
    fn bare_geometry_is_accepted() {
        let text = r#"{ "type": "LineString", "coordinates": [[0, 0], [0, 0.001]] }"#;
        let lines = parse_features(text).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].id, "unknown");
    }

    #[test]
    fn invalid_text_is_an_error() {
        assert!(matches!(parse_features("{ not json"), Err(SpatialError::GeoJson(_))));
    }

    #[test]
    fn route_exports_as_line_string() {
        let lines = parse_features(ROADS).unwrap();
        let mut b = RoadNetworkBuilder::new();
        b.add_features(&lines);
        let net = b.build();

        let route = shortest_path(
            &net,
            Coordinate::new(108.900, 34.370),
            Coordinate::new(108.902, 34.370),
        )
        .unwrap();
        assert_eq!(route.len(), 3);

        let feature = route.to_geojson();
        let props = feature.properties.as_ref().unwrap();
        assert_eq!(props["vertex_count"], 3);
        assert!(props["distance_m"].as_f64().unwrap() > 180.0);
        match feature.geometry.unwrap().value {
            ::geojson::Value::LineString(line) => {
                assert_eq!(line.len(), 3);
                assert_eq!(line[0], vec![108.900, 34.370]);
            }
            other => panic!("unexpected geometry {other:?}"),
        }
        assert!(route.to_geojson_string().contains("LineString"));
    }
}

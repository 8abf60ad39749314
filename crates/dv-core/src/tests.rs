//! Unit tests for dv-core primitives.

#[cfg(test)]
mod ids {
    use crate::NodeId;

    #[test]
    fn index_roundtrip() {
        let id = NodeId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(NodeId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn invalid_is_default_and_max() {
        assert_eq!(NodeId::default(), NodeId::INVALID);
        assert_eq!(NodeId::INVALID.0, u32::MAX);
        assert!(!NodeId::INVALID.in_range(10));
    }

    #[test]
    fn all_is_ascending() {
        let ids: Vec<_> = NodeId::all(3).collect();
        assert_eq!(ids, [NodeId(0), NodeId(1), NodeId(2)]);
    }

    #[test]
    fn max_nodes_keeps_ids_below_invalid() {
        assert_eq!(NodeId::all(0).count(), 0);
        assert_eq!(NodeId::try_from(NodeId::MAX_NODES - 1).unwrap(), NodeId(u32::MAX - 1));
        assert!(!NodeId::INVALID.in_range(NodeId::MAX_NODES));
    }

    #[test]
    fn display() {
        assert_eq!(NodeId(7).to_string(), "NodeId(7)");
    }
}

#[cfg(test)]
mod cost {
    use crate::Cost;

    #[test]
    fn addition_saturates_at_infinity() {
        assert_eq!(Cost(2) + Cost(3), Cost(5));
        assert_eq!(Cost(1) + Cost::INFINITY, Cost::INFINITY);
        assert_eq!(Cost(u32::MAX - 1) + Cost(5), Cost::INFINITY);
    }

    #[test]
    fn infinity_orders_last() {
        assert!(Cost(1_000_000) < Cost::INFINITY);
        assert!(Cost::ZERO < Cost(1));
    }

    #[test]
    fn option_conversion() {
        assert_eq!(Cost::from(None), Cost::INFINITY);
        assert_eq!(Cost::from(Some(4)), Cost(4));
        assert_eq!(Cost::INFINITY.finite(), None);
    }

    #[test]
    fn display() {
        assert_eq!(Cost(11).to_string(), "11");
        assert_eq!(Cost::INFINITY.to_string(), "inf");
    }
}

#[cfg(test)]
mod packet {
    use crate::{Cost, NodeId, Packet};

    #[test]
    fn packet_owns_its_vector() {
        let mut row = vec![Cost(0), Cost(1)];
        let pkt = Packet::new(NodeId(0), NodeId(1), row.clone());
        row[1] = Cost(99);
        assert_eq!(pkt.vector(), &[Cost(0), Cost(1)]);
        assert_eq!(pkt.source(), NodeId(0));
        assert_eq!(pkt.destination(), NodeId(1));
    }
}

#[cfg(test)]
mod topology {
    use crate::{Cost, DvError, NodeId, SimRng, Topology};

    #[test]
    fn cost_matrix_is_symmetric_with_zero_diagonal() {
        let m = Topology::new(3).link(0, 1, 4).link(1, 2, 7).cost_matrix();
        assert_eq!(m[0], [Cost(0), Cost(4), Cost::INFINITY]);
        assert_eq!(m[1], [Cost(4), Cost(0), Cost(7)]);
        assert_eq!(m[2][1], Cost(7));
    }

    #[test]
    fn validate_rejects_bad_links() {
        assert!(matches!(
            Topology::new(2).link(0, 0, 1).validate(),
            Err(DvError::SelfLink(NodeId(0)))
        ));
        assert!(matches!(
            Topology::new(2).link(0, 5, 1).validate(),
            Err(DvError::NodeOutOfRange { .. })
        ));
        assert!(matches!(
            Topology::new(3).link(0, 1, 1).link(1, 0, 2).validate(),
            Err(DvError::DuplicateLink { .. })
        ));
        assert!(Topology::new(3).link(0, 1, 1).link(1, 2, 1).validate().is_ok());
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn validate_rejects_oversized_network() {
        assert!(matches!(
            Topology::new(NodeId::MAX_NODES + 1).validate(),
            Err(DvError::TooManyNodes { .. })
        ));
    }

    #[test]
    fn shortest_paths_prefers_cheaper_detour() {
        // 0 -10- 2 directly, but 0 -1- 1 -2- 2 costs 3.
        let sp = Topology::new(3).link(0, 2, 10).link(0, 1, 1).link(1, 2, 2).shortest_paths();
        assert_eq!(sp[0], [Cost(0), Cost(1), Cost(3)]);
        assert_eq!(sp[2], [Cost(3), Cost(2), Cost(0)]);
    }

    #[test]
    fn shortest_paths_marks_disconnected_infinite() {
        let sp = Topology::new(4).link(0, 1, 1).link(2, 3, 1).shortest_paths();
        assert_eq!(sp[0][2], Cost::INFINITY);
        assert_eq!(sp[3][2], Cost(1));
    }

    #[test]
    fn random_topology_is_valid_and_connected() {
        let mut rng = SimRng::new(7);
        for n in [1, 2, 5, 12] {
            let topo = Topology::random(n, 0.3, 9, &mut rng);
            topo.validate().unwrap();
            let sp = topo.shortest_paths();
            assert!(sp.iter().flatten().all(|c| c.is_finite()), "n = {n}");
        }
    }

    #[test]
    fn random_topology_is_deterministic() {
        let a = Topology::random(8, 0.4, 5, &mut SimRng::new(3));
        let b = Topology::random(8, 0.4, 5, &mut SimRng::new(3));
        assert_eq!(a, b);
    }
}

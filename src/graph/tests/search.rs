use crate::error::SearchError;
use crate::graph::graph::Graph;
use crate::graph::itinerary::{FlightLeg, LayoverLeg, Leg};
use crate::graph::search::{ShortestPaths, find_cheapest_itinerary};
use crate::graph::tests::utils::{add_record, at, id, shanghai_connection};

#[test]
fn test_two_legs_with_layover() {
    let graph = Graph::build(&shanghai_connection(at(12, 0)));

    let itinerary = find_cheapest_itinerary(&graph, "TAO", "NGO").unwrap().unwrap();

    assert_eq!(120.0, itinerary.total_cost);
    assert_eq!(
        vec![
            Leg::Flight(FlightLeg {
                origin: id("TAO"),
                destination: id("PVG"),
                departure: at(8, 0),
                arrival: at(10, 0),
                flight_id: id("MU1"),
                price: 50.0,
            }),
            Leg::Layover(LayoverLeg {
                location: id("PVG"),
                from: at(10, 0),
                until: at(12, 0),
            }),
            Leg::Flight(FlightLeg {
                origin: id("PVG"),
                destination: id("NGO"),
                departure: at(12, 0),
                arrival: at(14, 0),
                flight_id: id("MU2"),
                price: 70.0,
            }),
        ],
        itinerary.legs
    );
    let layover = itinerary.layovers().next().unwrap();
    assert_eq!("2.0", layover.hours());
}

#[test]
fn test_short_layover_means_no_path() {
    let graph = Graph::build(&shanghai_connection(at(8, 30)));

    assert_eq!(Ok(None), find_cheapest_itinerary(&graph, "TAO", "NGO"));
}

#[test]
fn test_cheaper_connection_beats_direct_flight() {
    let mut records = shanghai_connection(at(12, 0));
    add_record(&mut records, "DIRECT", "TAO", "NGO", at(8, 0), at(11, 0), 200.0);
    let graph = Graph::build(&records);

    let itinerary = find_cheapest_itinerary(&graph, "TAO", "NGO").unwrap().unwrap();

    assert_eq!(120.0, itinerary.total_cost);
    assert_eq!(
        vec![id("MU1"), id("MU2")],
        itinerary.flights().map(|f| f.flight_id.clone()).collect::<Vec<_>>()
    );
}

#[test]
fn test_direct_flight_wins_when_cheaper() {
    let mut records = shanghai_connection(at(12, 0));
    add_record(&mut records, "DIRECT", "TAO", "NGO", at(8, 0), at(11, 0), 110.0);
    let graph = Graph::build(&records);

    let itinerary = find_cheapest_itinerary(&graph, "TAO", "NGO").unwrap().unwrap();

    assert_eq!(110.0, itinerary.total_cost);
    assert_eq!(1, itinerary.legs.len());
    assert_eq!(0, itinerary.stops());
}

#[test]
fn test_unknown_origin() {
    let graph = Graph::build(&shanghai_connection(at(12, 0)));

    assert_eq!(
        Err(SearchError::LocationNotFound { missing: vec![id("XXX")] }),
        find_cheapest_itinerary(&graph, "XXX", "NGO")
    );
}

#[test]
fn test_unknown_destination_and_both() {
    let graph = Graph::build(&shanghai_connection(at(12, 0)));

    assert_eq!(
        Err(SearchError::LocationNotFound { missing: vec![id("YYY")] }),
        find_cheapest_itinerary(&graph, "TAO", "YYY")
    );
    assert_eq!(
        Err(SearchError::LocationNotFound { missing: vec![id("XXX"), id("YYY")] }),
        find_cheapest_itinerary(&graph, "XXX", "YYY")
    );
}

#[test]
fn test_empty_graph_knows_no_locations() {
    let graph = Graph::build(&[]);

    assert_eq!(
        Err(SearchError::LocationNotFound { missing: vec![id("TAO"), id("NGO")] }),
        find_cheapest_itinerary(&graph, "TAO", "NGO")
    );
}

#[test]
fn test_same_location() {
    let graph = Graph::build(&shanghai_connection(at(12, 0)));

    assert_eq!(
        Err(SearchError::SameLocation(id("PVG"))),
        find_cheapest_itinerary(&graph, "PVG", "pvg")
    );
}

#[test]
fn test_codes_are_normalized() {
    let graph = Graph::build(&shanghai_connection(at(12, 0)));

    let itinerary = find_cheapest_itinerary(&graph, " tao", "ngo ").unwrap().unwrap();

    assert_eq!(120.0, itinerary.total_cost);
}

#[test]
fn test_disconnected_schedules() {
    let mut records = Vec::new();
    add_record(&mut records, "F1", "TAO", "PVG", at(8, 0), at(10, 0), 50.0);
    add_record(&mut records, "F2", "NGO", "CAN", at(12, 0), at(14, 0), 70.0);
    let graph = Graph::build(&records);

    assert_eq!(Ok(None), find_cheapest_itinerary(&graph, "TAO", "CAN"));
    // destination is known only as a departure point
    assert_eq!(Ok(None), find_cheapest_itinerary(&graph, "TAO", "NGO"));
}

#[test]
fn test_flights_cannot_go_back_in_time() {
    let mut records = Vec::new();
    add_record(&mut records, "LATE", "TAO", "PVG", at(18, 0), at(20, 0), 10.0);
    add_record(&mut records, "EARLY", "PVG", "NGO", at(9, 0), at(11, 0), 10.0);
    let graph = Graph::build(&records);

    assert_eq!(Ok(None), find_cheapest_itinerary(&graph, "TAO", "NGO"));
}

#[test]
fn test_cheapest_parallel_flight_is_used() {
    let mut records = Vec::new();
    add_record(&mut records, "PRICEY", "TAO", "PVG", at(8, 0), at(10, 0), 90.0);
    add_record(&mut records, "CHEAP", "TAO", "PVG", at(8, 0), at(10, 0), 40.0);
    let graph = Graph::build(&records);

    let itinerary = find_cheapest_itinerary(&graph, "TAO", "PVG").unwrap().unwrap();

    assert_eq!(40.0, itinerary.total_cost);
    assert_eq!(id("CHEAP"), itinerary.flights().next().unwrap().flight_id);
}

#[test]
fn test_first_of_equal_itineraries_wins() {
    let mut records = Vec::new();
    add_record(&mut records, "EARLY", "TAO", "NGO", at(7, 0), at(9, 0), 100.0);
    add_record(&mut records, "LATE", "TAO", "NGO", at(8, 0), at(10, 0), 100.0);
    let graph = Graph::build(&records);

    let itinerary = find_cheapest_itinerary(&graph, "TAO", "NGO").unwrap().unwrap();

    assert_eq!(
        vec![id("EARLY")],
        itinerary.flights().map(|f| f.flight_id.clone()).collect::<Vec<_>>()
    );
}

#[test]
fn test_waiting_at_origin_shows_as_layover() {
    let mut records = shanghai_connection(at(12, 0));
    add_record(&mut records, "INBOUND", "CAN", "TAO", at(3, 0), at(5, 0), 500.0);
    let graph = Graph::build(&records);

    let itinerary = find_cheapest_itinerary(&graph, "TAO", "NGO").unwrap().unwrap();

    assert_eq!(120.0, itinerary.total_cost);
    assert_eq!(
        Leg::Layover(LayoverLeg {
            location: id("TAO"),
            from: at(5, 0),
            until: at(8, 0),
        }),
        itinerary.legs[0]
    );
    assert_eq!(Some(at(8, 0)), itinerary.departure());
}

#[test]
fn test_search_is_idempotent() {
    let mut records = shanghai_connection(at(12, 0));
    add_record(&mut records, "DIRECT", "TAO", "NGO", at(8, 0), at(11, 0), 200.0);
    let graph = Graph::build(&records);

    let first = find_cheapest_itinerary(&graph, "TAO", "NGO");
    let second = find_cheapest_itinerary(&graph, "TAO", "NGO");

    assert_eq!(first, second);
}

#[test]
fn test_shortest_paths() {
    let graph = Graph::build(&shanghai_connection(at(12, 0)));
    let tao = graph.find_vertex("TAO", at(8, 0)).unwrap();
    let ngo = graph.find_vertex("NGO", at(14, 0)).unwrap();

    let from_tao = ShortestPaths::from(&graph, tao);
    assert_eq!(Some(0.0), from_tao.cost_to(tao));
    assert_eq!(Some(120.0), from_tao.cost_to(ngo));
    assert_eq!(Some(vec![]), from_tao.path_to(&graph, tao));
    assert_eq!(3, from_tao.path_to(&graph, ngo).unwrap().len());

    let from_ngo = ShortestPaths::from(&graph, ngo);
    assert_eq!(None, from_ngo.cost_to(tao));
    assert_eq!(None, from_ngo.path_to(&graph, tao));
}

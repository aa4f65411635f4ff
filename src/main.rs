use bodygraph_core::{areas_of_definition, classify_definition, defined_centers, parse_channels};

fn main() {
    // Example usage: the channel list a calculation service would return
    // for a triple-split chart.
    let ids = ["64-47", "1-8", "34-57"];

    let channels = parse_channels(ids);
    let areas = areas_of_definition(channels.iter().copied());
    let definition = classify_definition(channels.iter().copied());

    println!("channels: {:?}", channels);
    println!("defined centers: {:?}", defined_centers(channels.iter().copied()));
    println!("areas of definition: {:#?}", areas);
    println!("definition: {}", definition);
}

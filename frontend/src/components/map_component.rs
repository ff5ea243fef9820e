use gloo_utils::document;
use leaflet::{LatLng, Map, MapOptions, Marker, TileLayer, TileLayerOptions};
use trip_dispatch_lib::location::Location;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, Node};
use yew::prelude::*;

/// One map, one marker. The map instance is created once and kept for the
/// component's whole life; position changes move the existing marker and
/// recenter the view, preserving the user's zoom.
pub struct MapComponent {
    map: Map,
    container: HtmlElement,
    marker: Option<Marker>,
}

#[derive(PartialEq, Properties, Clone)]
pub struct Props {
    /// Non-finite or absent coordinates render a map with no marker.
    pub position: Option<Location>,
    #[prop_or(14.0)]
    pub zoom: f64,
}

impl MapComponent {
    fn render_map(&self) -> Html {
        let node: &Node = &self.container.clone().into();
        Html::VRef(node.clone())
    }

    /// `zoom` only applies when the marker is first placed; afterwards the
    /// user's zoom level is kept.
    fn sync_marker(&mut self, position: Option<Location>, zoom: f64) {
        match position.filter(Location::is_plottable) {
            Some(location) => {
                let lat_lng = LatLng::new(location.lat, location.lng);
                match &self.marker {
                    Some(marker) => {
                        marker.set_lat_lng(&lat_lng);
                        let current_zoom = self.map.get_zoom();
                        self.map.set_view(&lat_lng, current_zoom);
                    }
                    None => {
                        let marker = Marker::new(&lat_lng);
                        marker.add_to(&self.map);
                        self.map.set_view(&lat_lng, zoom);
                        self.marker = Some(marker);
                    }
                }
            }
            None => {
                if let Some(marker) = self.marker.take() {
                    marker.remove();
                }
            }
        }
    }
}

impl Component for MapComponent {
    type Message = ();
    type Properties = Props;

    fn create(_ctx: &Context<Self>) -> Self {
        let container: Element = document().create_element("div").unwrap();
        let container: HtmlElement = container.dyn_into().unwrap();
        container.set_class_name("map");

        let map = Map::new_with_element(&container, &MapOptions::default());

        Self {
            map,
            container,
            marker: None,
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render {
            let props = ctx.props();
            add_tile_layer(&self.map);

            // Neutral world view until coordinates arrive.
            self.map.set_view(&LatLng::new(0.0, 0.0), 2.0);
            self.sync_marker(props.position, props.zoom);
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, _old_props: &Self::Properties) -> bool {
        self.map.invalidate_size(false);
        let props = ctx.props();
        self.sync_marker(props.position, props.zoom);
        true
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        html! {
            <div class="map">
                {self.render_map()}
            </div>
        }
    }
}

fn add_tile_layer(map: &Map) {
    let url = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";
    let opts = TileLayerOptions::new();
    opts.set_update_when_idle(true);
    TileLayer::new_options(url, &opts).add_to(map);
}

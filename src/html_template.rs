use axum::response::Html;

pub fn get_map_html() -> Html<String> {
    Html(MAP_HTML.replace("{{VERSION}}", env!("CARGO_PKG_VERSION")))
}

// HTML template for the map page. Map composition, filter options and markers
// all come from the JSON API, the page only draws them.
const MAP_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>QuakeMap v{{VERSION}}</title>
    <link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css" />
    <style>
        body { margin: 0; padding: 0; font-family: Arial, sans-serif; }
        header { padding: 8px 16px; background: #222; color: white; }
        header h1 { margin: 0; font-size: 1.3em; }
        #controls { display: flex; flex-direction: row; gap: 16px; padding: 8px 16px; }
        .filter-group h6 { margin: 0 0 6px 0; font-size: 1em; }
        .filter-group .buttons { display: flex; gap: 8px; }
        .filter-button {
            border: 2px solid black;
            background: white;
            color: black;
            padding: 6px 12px;
            border-radius: 4px;
            cursor: pointer;
            font-weight: bold;
        }
        .filter-button:hover { background: lightgray; }
        .filter-button.active { background: grey; }
        #status { padding: 0 16px 8px 16px; color: #666; font-size: 0.9em; }
        #map { height: 100vh; width: 100%; }
        .quake-popup h2 { margin: 0 0 6px 0; font-size: 1.2em; }
        .quake-popup h3 { margin: 6px 0 0 0; font-size: 1em; }
        .quake-popup .label { font-weight: bold; }
    </style>
</head>
<body>
    <header><h1>🌍 QuakeMap</h1></header>
    <div id="controls">
        <div class="filter-group">
            <h6>Select Magnitude</h6>
            <div class="buttons" id="magnitude-buttons"></div>
        </div>
        <div class="filter-group">
            <h6>Select Time Period</h6>
            <div class="buttons" id="time-window-buttons"></div>
        </div>
    </div>
    <div id="status">Loading...</div>
    <div id="map"></div>

    <script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
    <script>
        let map;
        let quakeLayer;
        let markerStyle = {};
        let selected = {};

        async function loadConfig() {
            const response = await fetch('/api/config');
            const config = await response.json();
            selected = config.selected;
            markerStyle = config.map.marker_style;

            const view = config.map.view;
            map = L.map('map', {
                center: view.center,
                zoom: view.zoom,
                minZoom: view.min_zoom,
                maxBounds: view.max_bounds,
                maxBoundsViscosity: view.max_bounds_viscosity
            });

            const baseLayers = {};
            config.map.base_layers.forEach(layer => {
                const tiles = L.tileLayer(layer.url, { attribution: layer.attribution });
                baseLayers[layer.name] = tiles;
                if (layer.checked) {
                    tiles.addTo(map);
                }
            });

            quakeLayer = L.layerGroup();
            if (config.map.overlay_checked) {
                quakeLayer.addTo(map);
            }
            const overlays = {};
            overlays[config.map.overlay_name] = quakeLayer;
            L.control.layers(baseLayers, overlays, { position: 'topright' }).addTo(map);

            renderButtons('magnitude-buttons', config.options.magnitude, 'magnitude');
            renderButtons('time-window-buttons', config.options.time_window, 'time_window');
        }

        function renderButtons(containerId, options, key) {
            const container = document.getElementById(containerId);
            container.innerHTML = '';
            options.forEach(option => {
                const button = document.createElement('button');
                button.textContent = option;
                button.className = 'filter-button' + (selected[key] === option ? ' active' : '');
                button.onclick = () => selectFilter(key, option);
                container.appendChild(button);
            });
        }

        async function selectFilter(key, option) {
            try {
                const body = {};
                body[key] = option;
                const response = await fetch('/api/filters', {
                    method: 'POST',
                    headers: { 'Content-Type': 'application/json' },
                    body: JSON.stringify(body)
                });
                const result = await response.json();
                if (!result.success) {
                    console.error('Filter rejected:', result.error);
                    return;
                }
                selected.magnitude = result.magnitude;
                selected.time_window = result.time_window;
                console.log('Fetching data from URL:', result.feed_url);
                updateButtons();
            } catch (error) {
                console.error('Failed to update filters:', error);
            }
        }

        function updateButtons() {
            document.querySelectorAll('#magnitude-buttons .filter-button').forEach(button => {
                button.classList.toggle('active', button.textContent === selected.magnitude);
            });
            document.querySelectorAll('#time-window-buttons .filter-button').forEach(button => {
                button.classList.toggle('active', button.textContent === selected.time_window);
            });
        }

        // The selection lives on the server, another tab may have changed it.
        async function syncFilters() {
            try {
                const response = await fetch('/api/filters');
                const filters = await response.json();
                selected.magnitude = filters.magnitude;
                selected.time_window = filters.time_window;
                updateButtons();
            } catch (error) {
                console.error('Failed to load filters:', error);
            }
        }

        async function loadQuakes() {
            try {
                const response = await fetch('/api/quakes');
                const data = await response.json();
                quakeLayer.clearLayers();
                data.markers.forEach(quake => {
                    const marker = L.circleMarker([quake.lat, quake.lon], {
                        radius: quake.radius,
                        color: markerStyle.color,
                        fillColor: markerStyle.fillColor,
                        fillOpacity: markerStyle.fillOpacity,
                        weight: markerStyle.weight
                    });
                    if (quake.popup_html) {
                        marker.bindPopup(quake.popup_html);
                    }
                    quakeLayer.addLayer(marker);
                });
                const title = data.title || 'No data yet';
                document.getElementById('status').textContent = `${title}: ${data.count} earthquakes`;
                console.log(`Loaded ${data.count} earthquakes from ${data.feed_url}`);
            } catch (error) {
                console.error('Failed to load earthquakes:', error);
            }
        }

        function listenForUpdates() {
            const events = new EventSource('/api/events');
            events.addEventListener('features_updated', async () => {
                await syncFilters();
                loadQuakes();
            });
            events.addEventListener('fetch_failed', (e) => {
                console.log('Feed fetch failed:', JSON.parse(e.data).data.message);
            });
        }

        loadConfig().then(() => {
            listenForUpdates();
            loadQuakes();
        });
    </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_wires_api_routes() {
        let Html(page) = get_map_html();
        assert!(page.contains("/api/config"));
        assert!(page.contains("/api/quakes"));
        assert!(page.contains("/api/events"));
        assert!(!page.contains("{{VERSION}}"));
    }

    #[test]
    fn page_resyncs_buttons_on_update() {
        let Html(page) = get_map_html();
        let listener = page
            .find("addEventListener('features_updated'")
            .expect("features_updated listener");
        let handler = &page[listener..];
        let sync = handler.find("syncFilters()").expect("listener re-reads filters");
        let reload = handler.find("loadQuakes()").expect("listener reloads markers");
        assert!(sync < reload);
        assert!(page.contains("fetch('/api/filters')"));
    }
}

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for the Elgato HTTP client using wiremock.

use std::time::Duration;

use keylight_lib::client::{DeviceClient, DeviceHandle};
use keylight_lib::controller::{ControllerConfig, LightController};
use keylight_lib::elgato::{ElgatoClient, ElgatoConfig};
use keylight_lib::error::{DeviceError, ProtocolError};
use keylight_lib::queue::{Adjustment, task_queue};
use keylight_lib::types::{Brightness, ColorTemperature};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SCAN: Duration = Duration::from_secs(2);

async fn mount_light(server: &MockServer, serial: &str, display_name: &str) {
    Mock::given(method("GET"))
        .and(path("/elgato/accessory-info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "productName": "Elgato Key Light",
            "hardwareBoardType": 53,
            "firmwareBuildNumber": 218,
            "firmwareVersion": "1.0.3",
            "serialNumber": serial,
            "displayName": display_name,
            "features": ["lights"]
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/elgato/lights"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "numberOfLights": 1,
            "lights": [{ "on": 1, "brightness": 33, "temperature": 344 }]
        })))
        .mount(server)
        .await;
}

fn client_for(server: &MockServer) -> ElgatoClient {
    ElgatoClient::new(
        ElgatoConfig::new()
            .with_host("127.0.0.1")
            .with_port(server.address().port())
            .with_request_timeout(Duration::from_secs(1)),
    )
    .unwrap()
}

// ============================================================================
// Discovery
// ============================================================================

mod discovery {
    use super::*;

    #[tokio::test]
    async fn finds_light_answering_on_configured_host() {
        let server = MockServer::start().await;
        mount_light(&server, "BW33J1A02345", "Desk Light").await;

        let found = client_for(&server).discover(SCAN).await.unwrap();

        assert_eq!(found.len(), 1);
        let light = &found[0];
        assert_eq!(light.serial.as_str(), "BW33J1A02345");
        assert_eq!(light.name, "Desk Light");
        assert_eq!(light.address, "127.0.0.1");
        assert!(light.status.power);
        assert_eq!(light.status.brightness.value(), 33);
        assert_eq!(light.status.temperature.kelvin(), 2907);
    }

    #[tokio::test]
    async fn unnamed_light_uses_product_name() {
        let server = MockServer::start().await;
        mount_light(&server, "BW33J1A02345", "").await;

        let found = client_for(&server).discover(SCAN).await.unwrap();

        assert_eq!(found[0].name, "Elgato Key Light");
    }

    #[tokio::test]
    async fn host_given_as_url_is_used_verbatim() {
        let server = MockServer::start().await;
        mount_light(&server, "CW21K1A00001", "Left").await;

        let client = ElgatoClient::new(ElgatoConfig::new().with_host(server.uri())).unwrap();
        let found = client.discover(SCAN).await.unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].address, server.uri());
    }

    #[tokio::test]
    async fn invalid_host_does_not_hide_live_lights() {
        let server = MockServer::start().await;
        mount_light(&server, "BW33J1A02345", "Desk Light").await;

        let client = ElgatoClient::new(
            ElgatoConfig::new()
                .with_host("bad host")
                .with_host("127.0.0.1")
                .with_port(server.address().port()),
        )
        .unwrap();
        let found = client.discover(SCAN).await.unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].serial.as_str(), "BW33J1A02345");
    }

    #[tokio::test]
    async fn host_that_is_not_a_light_is_skipped() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let found = client_for(&server).discover(SCAN).await.unwrap();

        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn slow_hosts_are_cut_off_at_the_deadline() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({}))
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let client = ElgatoClient::new(
            ElgatoConfig::new()
                .with_host("127.0.0.1")
                .with_port(server.address().port())
                .with_request_timeout(Duration::from_secs(10)),
        )
        .unwrap();

        let started = std::time::Instant::now();
        let found = client
            .discover(Duration::from_millis(200))
            .await
            .unwrap();

        assert!(found.is_empty());
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[tokio::test]
    async fn results_follow_candidate_order() {
        let first = MockServer::start().await;
        let second = MockServer::start().await;
        mount_light(&first, "AAA", "First").await;
        mount_light(&second, "BBB", "Second").await;

        let client = ElgatoClient::new(
            ElgatoConfig::new()
                .with_host(second.uri())
                .with_host(first.uri()),
        )
        .unwrap();
        let found = client.discover(SCAN).await.unwrap();

        let serials: Vec<_> = found.iter().map(|d| d.serial.as_str()).collect();
        assert_eq!(serials, ["BBB", "AAA"]);
    }
}

// ============================================================================
// Light handle
// ============================================================================

mod light {
    use super::*;

    #[tokio::test]
    async fn read_status_converts_mireds() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/elgato/lights"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "numberOfLights": 1,
                "lights": [{ "on": 0, "brightness": 100, "temperature": 143 }]
            })))
            .mount(&server)
            .await;

        let light = client_for(&server).light("127.0.0.1").unwrap();
        let status = light.read_status().await.unwrap();

        assert!(!status.power);
        assert_eq!(status.brightness, Brightness::MAX);
        assert_eq!(status.temperature.kelvin(), 6993);
    }

    #[tokio::test]
    async fn writes_send_only_the_changed_field() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/elgato/lights"))
            .and(body_json(json!({ "numberOfLights": 1, "lights": [{ "on": 1 }] })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/elgato/lights"))
            .and(body_json(
                json!({ "numberOfLights": 1, "lights": [{ "temperature": 200 }] }),
            ))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let light = client_for(&server).light("127.0.0.1").unwrap();
        light.set_power(true).await.unwrap();
        light
            .set_temperature(ColorTemperature::NEUTRAL)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn error_status_is_a_protocol_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let light = client_for(&server).light("127.0.0.1").unwrap();
        let err = light.read_status().await.unwrap_err();

        assert!(matches!(
            err,
            DeviceError::Protocol(ProtocolError::Status { status: 503, .. })
        ));
    }

    #[tokio::test]
    async fn malformed_body_is_a_json_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let light = client_for(&server).light("127.0.0.1").unwrap();
        let err = light.read_status().await.unwrap_err();

        assert!(matches!(err, DeviceError::Protocol(ProtocolError::Json(_))));
    }

    #[tokio::test]
    async fn closed_port_is_unreachable() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };

        let client = ElgatoClient::new(ElgatoConfig::new().with_port(port)).unwrap();
        let light = client.light("127.0.0.1").unwrap();
        let err = light.set_brightness(Brightness::MAX).await.unwrap_err();

        assert!(matches!(err, DeviceError::Unreachable(_)));
    }
}

// ============================================================================
// Controller over HTTP
// ============================================================================

mod controller {
    use super::*;

    #[tokio::test]
    async fn discovered_light_receives_adjustment() {
        let server = MockServer::start().await;
        mount_light(&server, "BW33J1A02345", "Desk Light").await;
        Mock::given(method("PUT"))
            .and(path("/elgato/lights"))
            .and(body_json(
                json!({ "numberOfLights": 1, "lights": [{ "brightness": 70 }] }),
            ))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let (tasks, receiver) = task_queue();
        let controller =
            LightController::new(client_for(&server), &tasks, ControllerConfig::new());
        let mut events = controller.subscribe();
        let worker = tokio::spawn(controller.run(receiver));

        tasks.discover(SCAN);
        tasks.adjust(Adjustment::new("BW33J1A02345").with_brightness(Brightness::clamped(70)));
        tasks.wait_idle().await;

        let created = events.try_recv().unwrap();
        assert!(created.is_created());
        assert_eq!(created.view().unwrap().name(), "Desk Light");
        assert!(events.try_recv().is_err());

        drop(tasks);
        worker.await.unwrap();
    }
}

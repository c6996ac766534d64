use service_booker::api::{
    CoverageApi, HttpCoverageApi, HttpReservationApi, MockBackend, Notifier, ReservationApi,
};
use service_booker::models::{Professional, Rates, ResolvedLocation};
use service_booker::{ReservationFlow, SubmissionState};
use std::env;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    info!("🛠️  Service Booker - reservation flow demo");
    info!("==========================================");
    info!("");

    let backend = Arc::new(MockBackend::default());
    let (coverage, reservations): (Arc<dyn CoverageApi>, Arc<dyn ReservationApi>) =
        match env::var("SERVICE_BOOKER_API_URL") {
            Ok(base) => {
                info!("Using live marketplace API at {}", base);
                (
                    Arc::new(HttpCoverageApi::new(&base)?) as Arc<dyn CoverageApi>,
                    Arc::new(HttpReservationApi::new(&base)?) as Arc<dyn ReservationApi>,
                )
            }
            Err(_) => {
                info!("SERVICE_BOOKER_API_URL not set, using in-process mock backend");
                (
                    Arc::clone(&backend) as Arc<dyn CoverageApi>,
                    Arc::clone(&backend) as Arc<dyn ReservationApi>,
                )
            }
        };
    let notifier: Arc<dyn Notifier> = Arc::clone(&backend) as Arc<dyn Notifier>;

    let professional = Professional {
        id: "pro-martinez".to_string(),
        owner_name: "Carlos Martinez".to_string(),
        trade: "plumber".to_string(),
        rates: Rates {
            hourly: 25,
            tech_visit: 40,
            emergency: 80,
        },
    };

    info!(
        "Booking {} ({}) - {}",
        professional.owner_name,
        professional.trade,
        professional.service_type_labels().join(" / ")
    );
    info!("");

    let mut flow = ReservationFlow::open(professional, coverage, reservations, notifier);

    print_gate(1, "empty form", &flow);

    flow.set_location(ResolvedLocation {
        latitude: -34.6037,
        longitude: -58.3816,
        display_address: "Av. Corrientes 1500, Centro".to_string(),
    });
    print_gate(2, "location picked", &flow);

    flow.set_work_description("Fix a leaking kitchen sink");
    print_gate(3, "work described", &flow);

    info!("Waiting for coverage validation to settle...");
    flow.validation_settled().await;
    print_gate(4, "validation settled", &flow);

    flow.submit().await;
    match flow.submission() {
        SubmissionState::Succeeded(ack) => {
            println!("5. submitted -> reservation {} created", ack.reservation_id);
        }
        SubmissionState::Failed(message) => {
            println!("5. submitted -> failed: {}", message);
        }
        other => println!("5. submitted -> unexpected state {:?}", other),
    }

    flow.close();
    info!("");
    info!("✅ Flow closed");

    Ok(())
}

fn print_gate(step: usize, label: &str, flow: &ReservationFlow) {
    let decision = flow.gate();
    println!(
        "{}. {} -> can_submit={} ({})",
        step,
        label,
        decision.can_submit,
        decision
            .blocking_reason
            .map(|reason| reason.to_string())
            .unwrap_or_else(|| "ready".to_string()),
    );
}

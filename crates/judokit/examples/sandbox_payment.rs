use judokit::{
    config::{Amount, Credentials, Environment, JudoConfig, Reference},
    device::{DeviceDataCollector, StaticPlatform},
    flow::{self, CardPaymentStep, CardTransaction},
    gateway::{CardDetails, ClientDetails, GatewayClient, PaymentRequest},
};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let token = std::env::var("JUDO_API_TOKEN").expect("JUDO_API_TOKEN not set");
    let secret = std::env::var("JUDO_API_SECRET").expect("JUDO_API_SECRET not set");
    let judo_id = std::env::var("JUDO_ID").expect("JUDO_ID not set");

    let config = JudoConfig::builder()
        .judo_id(judo_id)
        .credentials(Credentials::builder().token(token).secret(secret).build())
        .environment(Environment::Sandbox)
        .amount(
            Amount::builder()
                .amount(1u32)
                .currency("GBP".parse().expect("Invalid currency"))
                .build(),
        )
        .reference(
            Reference::builder()
                .consumer_reference("sandbox-consumer")
                .payment_reference(format!("sandbox-{}", std::process::id()))
                .build(),
        )
        .build();

    let client = GatewayClient::from_config(&config).expect("Invalid configuration");

    let device_data = DeviceDataCollector::builder()
        .maybe_sdk_app_id(config.sdk_app_id.clone())
        .build()
        .collect(&StaticPlatform::builder().sdk_version(33).build());

    let card = CardDetails::builder()
        .card_number("4976 0000 0000 3436")
        .expiry_date("12/30")
        .security_code("452")
        .build();
    let client_details = ClientDetails::builder()
        .device_data(device_data.into())
        .build();
    let request = PaymentRequest::from_config(&config, card, Some(client_details));

    match flow::pay_with_card(&client, CardTransaction::Payment, &request).await {
        CardPaymentStep::Completed(result) => {
            tracing::info!("Payment finished with code {}: {result:?}", result.code());
        }
        CardPaymentStep::RequiresVerification(model) => {
            tracing::info!(
                "3-D Secure challenge required for receipt {} at {}",
                model.receipt_id,
                model.acs_url
            );
        }
    }
}

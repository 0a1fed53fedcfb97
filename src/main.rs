use chrono::{TimeZone, Utc};
use clap::Parser;
use miette::{IntoDiagnostic, Result};
use payflow::application::orchestrator::{PaymentCommand, PaymentOrchestrator};
use payflow::application::query::{PaymentQueryEngine, QueryFilter};
use payflow::domain::card::CardData;
use payflow::domain::partner::{FeePolicy, Partner};
use payflow::domain::ports::{
    FeePolicyResolverBox, PartnerDirectoryBox, PaymentStoreBox, ProviderAdapterBox,
};
use payflow::infrastructure::in_memory::{
    InMemoryFeePolicyStore, InMemoryPartnerDirectory, InMemoryPaymentStore,
};
use payflow::providers::{MockProvider, ProviderRegistry, TokenProvider};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Partner to charge (1 = mock card, 3 = tokenized card)
    #[arg(long, default_value_t = 1)]
    partner: i64,

    /// Payment amount
    #[arg(long, default_value_t = dec!(10000))]
    amount: Decimal,

    /// Number of extra demo payments to seed before querying
    #[arg(long, default_value_t = 5)]
    seed: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "payflow=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let partners = InMemoryPartnerDirectory::new();
    let policies = InMemoryFeePolicyStore::new();
    let store = InMemoryPaymentStore::new();
    seed_fixtures(&partners, &policies).await;

    let adapters: Vec<ProviderAdapterBox> = vec![
        Box::new(MockProvider::new(1)),
        Box::new(TokenProvider::new(3)),
    ];
    let registry = ProviderRegistry::new(adapters);

    let partners_box: PartnerDirectoryBox = Box::new(partners);
    let policies_box: FeePolicyResolverBox = Box::new(policies);
    let store_box: PaymentStoreBox = Box::new(store.clone());
    let orchestrator = PaymentOrchestrator::new(partners_box, policies_box, store_box, registry);

    for _ in 0..cli.seed {
        let command = PaymentCommand {
            partner_id: 1,
            amount: dec!(5000),
            card_data: demo_card(1),
        };
        orchestrator.process(command).await.into_diagnostic()?;
    }

    let command = PaymentCommand {
        partner_id: cli.partner,
        amount: cli.amount,
        card_data: demo_card(cli.partner),
    };
    let payment = orchestrator.process(command).await.into_diagnostic()?;
    println!(
        "{}",
        serde_json::to_string_pretty(&payment).into_diagnostic()?
    );

    let engine = PaymentQueryEngine::new(Box::new(store));
    let result = engine.query(QueryFilter::default()).await.into_diagnostic()?;
    println!(
        "summary: count={} total={} net={}",
        result.summary.count, result.summary.total_amount, result.summary.total_net_amount
    );

    Ok(())
}

async fn seed_fixtures(partners: &InMemoryPartnerDirectory, policies: &InMemoryFeePolicyStore) {
    partners
        .insert(Partner::new(1, "PARTNER_A", "Partner A", true))
        .await;
    partners
        .insert(Partner::new(2, "PARTNER_B", "Partner B", true))
        .await;
    partners
        .insert(Partner::new(3, "PARTNER_C", "Partner C", true))
        .await;

    let epoch = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    policies
        .insert(FeePolicy {
            id: 1,
            partner_id: 1,
            effective_from: epoch,
            percentage: dec!(0.0235),
            fixed_fee: None,
        })
        .await;
    policies
        .insert(FeePolicy {
            id: 2,
            partner_id: 2,
            effective_from: epoch,
            percentage: dec!(0.0300),
            fixed_fee: Some(dec!(100)),
        })
        .await;
    policies
        .insert(FeePolicy {
            id: 3,
            partner_id: 3,
            effective_from: epoch,
            percentage: dec!(0.0250),
            fixed_fee: Some(dec!(50)),
        })
        .await;
}

fn demo_card(partner_id: i64) -> CardData {
    match partner_id {
        3 => CardData::Token {
            encrypted_card_token: "tok_demo_0001".into(),
            merchant_id: "M001".into(),
            order_id: "ORD-0001".into(),
        },
        _ => CardData::Mock {
            card_bin: "123456".into(),
            card_last4: "4242".into(),
            product_name: Some("DEMO CARD".into()),
        },
    }
}

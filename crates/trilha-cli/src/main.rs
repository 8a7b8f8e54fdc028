//! trilha-cli: drives the sync layer end to end from a terminal.
//!
//! Offline by default: a scripted transport plays the backend, so the whole
//! optimistic flow (mark → commit, mark → revert) is observable without a
//! server. Set `TRILHA_BASE_URL` to talk to a real backend instead.

use std::sync::Arc;

use trilha_core::app::{Client, ClientBuilder, Config};
use trilha_core::domain::{ChallengeId, RewardId, TaskId, TaskStatus};
use trilha_core::impls::{FileCredentialStore, StubHttpClient};

#[tokio::main]
async fn main() {
    env_logger::init();

    match std::env::var("TRILHA_BASE_URL") {
        Ok(base_url) => run_against_server(base_url).await,
        Err(_) => run_scripted_demo().await,
    }
}

async fn print_board(client: &Client, board: &trilha_core::app::ChallengeBoard) {
    for task in board.tasks().items().await {
        let state = match (task.status, task.pending_rescue) {
            (_, true) => "…",
            (TaskStatus::Concluida, _) => "✔",
            (TaskStatus::Pendente, _) => " ",
        };
        println!("  [{state}] {} ({} pts)", task.descricao, task.pontos);
    }
    for reward in board.rewards().items().await {
        let state = if reward.resgatada { "resgatada" } else { "disponível" };
        println!("  🎁 {} ({} pts, {state})", reward.nome, reward.custo_pontos);
    }
    println!(
        "  pontos: {}",
        board
            .points()
            .await
            .map(|p| p.to_string())
            .unwrap_or_else(|| "-".to_string())
    );
    let notification = client.notifier().snapshot().await;
    if notification.visible {
        println!("  >> [{:?}] {}", notification.severity, notification.message);
    }
}

async fn run_scripted_demo() {
    // (A) Script the backend: login, one challenge, its board, one
    //     completion that succeeds and one redemption the server rejects.
    let stub = StubHttpClient::new();
    stub.route_json(
        "auth/login",
        200,
        serde_json::json!({
            // payload claim: {"nome":"Maria"}
            "accessToken": "x.eyJub21lIjoiTWFyaWEifQ.y"
        }),
    )
    .await;
    stub.route_json(
        "desafios",
        200,
        serde_json::json!([{ "id": "c1", "nome": "Exercício", "descricao": "Diário" }]),
    )
    .await;
    stub.route_json(
        "c1/tarefas",
        200,
        serde_json::json!([
            { "id": "t1", "descricao": "Correr 5km", "pontos": 10, "status": "PENDENTE" }
        ]),
    )
    .await;
    stub.route_json(
        "recompensas/c1",
        200,
        serde_json::json!([
            { "id": "r1", "nome": "Pizza", "custoPontos": 50, "resgatada": false }
        ]),
    )
    .await;
    stub.route_json("pontos-usuario/c1", 200, serde_json::json!({ "pontos": 30 }))
        .await;
    // Completion confirms; the reconciling refetch and the balance follow.
    stub.route_json("concluir", 200, serde_json::json!({})).await;
    stub.route_json(
        "c1/tarefas",
        200,
        serde_json::json!([
            { "id": "t1", "descricao": "Correr 5km", "pontos": 10, "status": "CONCLUIDA" }
        ]),
    )
    .await;
    stub.route_json("pontos-usuario/c1", 200, serde_json::json!({ "pontos": 40 }))
        .await;
    // Redemption is rejected: watch the rollback.
    stub.route_json(
        "resgatar",
        400,
        serde_json::json!({ "message": "Pontos insuficientes." }),
    )
    .await;

    // (B) Wire the services once.
    let client = ClientBuilder::new(Config::default())
        .http(Arc::new(stub))
        .build()
        .await
        .expect("in-memory hydrate cannot fail");

    // (C) Login.
    let logged_in = client
        .auth()
        .login("maria@example.com", "segredo")
        .await
        .expect("demo credentials are non-empty");
    println!(
        "login ok={logged_in} como {}",
        client.session().display_name().await.unwrap_or_default()
    );

    // (D) Challenges.
    let directory = client.challenges();
    directory.load().await;
    let challenges = directory.challenges().await;
    for challenge in &challenges {
        println!("desafio: {} ({})", challenge.nome, challenge.descricao.as_deref().unwrap_or(""));
    }

    // (E) Open the board and drive the two rescues.
    let board = client.board(ChallengeId::new("c1"));
    board.load_all().await;
    println!("--- inicial ---");
    print_board(&client, &board).await;

    board.complete_task(&TaskId::new("t1")).await;
    println!("--- após concluir t1 ---");
    print_board(&client, &board).await;

    board.redeem_reward(&RewardId::new("r1")).await;
    println!("--- após tentar resgatar r1 (rejeitado) ---");
    print_board(&client, &board).await;
}

async fn run_against_server(base_url: String) {
    let config = Config {
        base_url,
        ..Config::default()
    };
    let token_path = std::env::var("TRILHA_TOKEN_FILE")
        .unwrap_or_else(|_| ".trilha-token".to_string());

    let client = match ClientBuilder::new(config)
        .credentials(Arc::new(FileCredentialStore::new(token_path)))
        .build()
        .await
    {
        Ok(client) => client,
        Err(e) => {
            eprintln!("falha ao iniciar: {e}");
            std::process::exit(1);
        }
    };

    if !client.session().is_authenticated().await {
        let email = std::env::var("TRILHA_EMAIL").unwrap_or_default();
        let password = std::env::var("TRILHA_PASSWORD").unwrap_or_default();
        match client.auth().login(&email, &password).await {
            Ok(true) => log::info!("sessão autenticada"),
            Ok(false) => {
                let notification = client.notifier().snapshot().await;
                eprintln!("login falhou: {}", notification.message);
                std::process::exit(1);
            }
            Err(errors) => {
                eprintln!("defina TRILHA_EMAIL e TRILHA_PASSWORD ({errors})");
                std::process::exit(1);
            }
        }
    }

    let directory = client.challenges();
    directory.load().await;
    let challenges = directory.challenges().await;
    if challenges.is_empty() {
        let state = directory.list_state().await;
        match state.error {
            Some(error) => eprintln!("erro ao listar desafios: {error}"),
            None => println!("nenhum desafio criado ainda."),
        }
        return;
    }

    for challenge in &challenges {
        println!("desafio {}: {}", challenge.id.as_str(), challenge.nome);
    }
    let board = client.board(challenges[0].id.clone());
    board.load_all().await;
    println!("--- {} ---", challenges[0].nome);
    print_board(&client, &board).await;
}

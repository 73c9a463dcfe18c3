use assert_cmd::Command;
use orthocons_test::{
    sequence_search_json, TestEnvironment, HOG_FASTA, HOG_JSON, ORTHOLOG_FASTA, QUERY_SEQUENCE,
    RATE4SITE_THREE_ROWS,
};
use predicates::prelude::*;
use std::path::Path;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn orthocons_cmd(env: &TestEnvironment) -> Command {
    let mut cmd = Command::cargo_bin("orthocons").unwrap();
    cmd.env("ORTHOCONS_HOME", env.home())
        .env("ORTHOCONS_WORKSPACE_DIR", env.path("work"))
        .env_remove("ORTHOCONS_OMA_URL")
        .env_remove("ORTHOCONS_LOG");
    cmd
}

fn write_config(env: &TestEnvironment, rate4site: &Path) -> std::path::PathBuf {
    env.write(
        "config.toml",
        &format!(
            "[rate4site]\nbinary = \"{}\"\ncolumns = [\"identity\", \"score\"]\n",
            rate4site.display()
        ),
    )
    .unwrap()
}

#[test]
fn test_cli_help_command() {
    let env = TestEnvironment::new().unwrap();
    orthocons_cmd(&env)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("orthologs"))
        .stdout(predicate::str::contains("align"))
        .stdout(predicate::str::contains("conserve"))
        .stdout(predicate::str::contains("--hogs"));
}

#[test]
fn test_cli_version_command() {
    let env = TestEnvironment::new().unwrap();
    orthocons_cmd(&env)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("orthocons"));
}

#[test]
fn test_missing_config_file_is_configuration_error() {
    let env = TestEnvironment::new().unwrap();
    orthocons_cmd(&env)
        .arg("--config")
        .arg(env.path("absent.toml"))
        .arg("conserve")
        .arg("msa.aln")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Config file not found"));
}

#[test]
fn test_missing_rate4site_binary() {
    let env = TestEnvironment::new().unwrap();
    let config = write_config(&env, &env.path("bin/rate4site"));
    orthocons_cmd(&env)
        .arg("--config")
        .arg(&config)
        .arg("conserve")
        .arg("msa.aln")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("binary not found"));
}

#[test]
fn test_config_flag_before_subcommand() {
    let env = TestEnvironment::new().unwrap();
    let config = env.write("custom.toml", "[oma]\nbase_url = \"not a url\"\n").unwrap();
    orthocons_cmd(&env)
        .arg("--config")
        .arg(&config)
        .arg("orthologs")
        .arg(QUERY_SEQUENCE)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Configuration error: not a url"));
}

#[test]
fn test_sequence_flags_conflict_with_subcommand() {
    let env = TestEnvironment::new().unwrap();
    orthocons_cmd(&env)
        .arg("--hogs")
        .arg("orthologs")
        .arg(QUERY_SEQUENCE)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("cannot be used before a subcommand"));
}

#[test]
fn test_malformed_sequence_is_an_input_error() {
    let env = TestEnvironment::new().unwrap();
    orthocons_cmd(&env)
        .arg("123MVLS")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Not a FASTA sequence"))
        .stderr(predicate::str::contains("database").not());
}

#[cfg(unix)]
mod with_stand_in_programs {
    use super::*;
    use std::path::PathBuf;

    // Fails unless the input FASTA exists, like the real aligner
    const T_COFFEE: &str = r#"while [ $# -gt 0 ]; do
  case "$1" in
    -infile) in="$2"; shift ;;
    -outfile) out="$2"; shift ;;
  esac
  shift
done
[ -f "$in" ] || { echo "cannot read $in" >&2; exit 3; }
printf 'CLUSTAL W (1.83) multiple sequence alignment\n' > "$out""#;

    fn install_tcoffee(env: &TestEnvironment) -> PathBuf {
        env.install_tool("t_coffee", T_COFFEE).unwrap()
    }

    fn write_pipeline_config(env: &TestEnvironment, t_coffee: &Path, rate4site: &Path) -> PathBuf {
        env.write(
            "pipeline.toml",
            &format!(
                "[tcoffee]\nbinary = \"{}\"\n\n[rate4site]\nbinary = \"{}\"\n",
                t_coffee.display(),
                rate4site.display()
            ),
        )
        .unwrap()
    }

    async fn mount_orthologs(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/api/sequence/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(sequence_search_json("HUMAN16963"), "application/json"),
            )
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/oma/vps/HUMAN16963/fasta/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(ORTHOLOG_FASTA))
            .mount(server)
            .await;
    }

    fn install_rate4site(env: &TestEnvironment) -> std::path::PathBuf {
        let script = format!(
            "while [ $# -gt 0 ]; do\n  case \"$1\" in\n    -o) out=\"$2\"; shift ;;\n  esac\n  shift\ndone\ncat > \"$out\" <<'TABLE'\n{}TABLE\n",
            RATE4SITE_THREE_ROWS
        );
        env.install_tool("rate4site", &script).unwrap()
    }

    #[test]
    fn test_conserve_tsv() {
        let env = TestEnvironment::new().unwrap();
        let config = write_config(&env, &install_rate4site(&env));
        let msa = env.write("data/msa.aln", "CLUSTAL W\n").unwrap();

        orthocons_cmd(&env)
            .arg("--config")
            .arg(&config)
            .arg("conserve")
            .arg(&msa)
            .arg("--format")
            .arg("tsv")
            .assert()
            .success()
            .stdout(predicate::str::starts_with("pos\tidentity\tscore\n"))
            .stdout(predicate::str::contains("2\tC\t-0.5\n"));

        // scorer directory removed on exit
        assert!(!env.path("data/msa").exists());
    }

    #[test]
    fn test_conserve_json_keep() {
        let env = TestEnvironment::new().unwrap();
        let config = write_config(&env, &install_rate4site(&env));
        let msa = env.write("data/msa.aln", "CLUSTAL W\n").unwrap();

        let assert = orthocons_cmd(&env)
            .arg("--config")
            .arg(&config)
            .arg("conserve")
            .arg(&msa)
            .arg("--columns")
            .arg("score,msa")
            .arg("--format")
            .arg("json")
            .arg("--keep")
            .assert()
            .success();

        let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
        assert_eq!(value["alpha"], 0.6781);
        assert_eq!(value["records"][2]["msa"]["aligned"], 2);
        assert!(env.path("data/msa/msa.res").exists());
    }

    #[test]
    fn test_unknown_column() {
        let env = TestEnvironment::new().unwrap();
        let config = write_config(&env, &install_rate4site(&env));
        orthocons_cmd(&env)
            .arg("--config")
            .arg(&config)
            .arg("conserve")
            .arg("msa.aln")
            .arg("--columns")
            .arg("identity,entropy")
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Unknown score column: entropy"));
    }

    #[test]
    fn test_scorer_without_output_is_not_found() {
        let env = TestEnvironment::new().unwrap();
        let rate4site = env.install_tool("rate4site", "exit 0").unwrap();
        let config = write_config(&env, &rate4site);
        let msa = env.write("msa.aln", "CLUSTAL W\n").unwrap();

        orthocons_cmd(&env)
            .arg("--config")
            .arg(&config)
            .arg("conserve")
            .arg(&msa)
            .assert()
            .code(3)
            .stderr(predicate::str::contains("Not found"))
            .stderr(predicate::str::contains("msa.res"));
    }

    #[test]
    fn test_align_into_workdir() {
        let env = TestEnvironment::new().unwrap();
        let config = write_pipeline_config(&env, &install_tcoffee(&env), &install_rate4site(&env));
        let fasta = env.write("data/orthologs.fasta", ORTHOLOG_FASTA).unwrap();
        let workdir = env.path("aligned");

        orthocons_cmd(&env)
            .arg("--config")
            .arg(&config)
            .arg("align")
            .arg(&fasta)
            .arg("--workdir")
            .arg(&workdir)
            .assert()
            .success()
            .stdout(predicate::str::contains("orthologs.aln"));

        let alignment = std::fs::read_to_string(workdir.join("orthologs.aln")).unwrap();
        assert!(alignment.starts_with("CLUSTAL W"));
    }

    #[test]
    fn test_align_in_workspace_root() {
        let env = TestEnvironment::new().unwrap();
        let config = write_pipeline_config(&env, &install_tcoffee(&env), &install_rate4site(&env));
        let fasta = env.write("data/orthologs.fasta", ORTHOLOG_FASTA).unwrap();

        let assert = orthocons_cmd(&env)
            .arg("align")
            .arg(&fasta)
            .arg("--config")
            .arg(&config)
            .assert()
            .success();

        let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
        let alignment = PathBuf::from(stdout.trim());
        assert!(alignment.starts_with(env.path("work")));
        assert!(alignment.is_file());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_run_orthologs_pipeline() {
        let server = MockServer::start().await;
        mount_orthologs(&server).await;

        let uri = server.uri();
        tokio::task::spawn_blocking(move || {
            let env = TestEnvironment::new().unwrap();
            let config = write_pipeline_config(&env, &install_tcoffee(&env), &install_rate4site(&env));
            let workdir = env.path("job");

            orthocons_cmd(&env)
                .arg("--oma-url")
                .arg(&uri)
                .arg("--config")
                .arg(&config)
                .arg("run")
                .arg(QUERY_SEQUENCE)
                .arg("--workdir")
                .arg(&workdir)
                .arg("--format")
                .arg("tsv")
                .assert()
                .success()
                .stdout(predicate::str::starts_with("pos\tidentity\tscore\n"))
                .stdout(predicate::str::contains("3\tD\t1.75\n"))
                .stderr(predicate::str::contains("Alignment kept in"));

            let sequences = std::fs::read_to_string(workdir.join("orthologs.fasta")).unwrap();
            assert!(sequences.starts_with(">Input Sequence\n"));
            assert!(sequences.contains(">MOUSE12345 | HBA_MOUSE\n"));
            assert!(workdir.join("orthologs.aln").is_file());
            // scorer directory is removed without --keep
            assert!(!workdir.join("orthologs").exists());
        })
        .await
        .unwrap();
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_run_hogs_keeps_temporary_workdir() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/sequence/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(sequence_search_json("HUMAN16963"), "application/json"),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/hog/HUMAN16963/"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(HOG_JSON, "application/json"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/oma/hogs/HUMAN16963/Mammalia/fasta/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(HOG_FASTA))
            .mount(&server)
            .await;

        let uri = server.uri();
        tokio::task::spawn_blocking(move || {
            let env = TestEnvironment::new().unwrap();
            let config = write_pipeline_config(&env, &install_tcoffee(&env), &install_rate4site(&env));

            orthocons_cmd(&env)
                .arg("run")
                .arg(QUERY_SEQUENCE)
                .arg("--hogs")
                .arg("--keep")
                .arg("--format")
                .arg("json")
                .arg("--config")
                .arg(&config)
                .arg("--oma-url")
                .arg(&uri)
                .assert()
                .success()
                .stdout(predicate::str::contains("\"alpha\": 0.6781"));

            let jobs: Vec<PathBuf> = std::fs::read_dir(env.path("work"))
                .unwrap()
                .map(|entry| entry.unwrap().path())
                .collect();
            assert_eq!(jobs.len(), 1);
            let job = &jobs[0];
            assert!(job.file_name().unwrap().to_string_lossy().starts_with("orthocons-"));
            assert_eq!(std::fs::read_to_string(job.join("hogs.fasta")).unwrap(), HOG_FASTA);
            assert!(job.join("hogs.aln").is_file());
            assert!(job.join("hogs/hogs.res").is_file());
        })
        .await
        .unwrap();
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_run_checks_programs_before_querying() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;

        let uri = server.uri();
        tokio::task::spawn_blocking(move || {
            let env = TestEnvironment::new().unwrap();
            let config =
                write_pipeline_config(&env, &install_tcoffee(&env), &env.path("bin/no-rate4site"));

            orthocons_cmd(&env)
                .arg("--oma-url")
                .arg(&uri)
                .arg("--config")
                .arg(&config)
                .arg("run")
                .arg(QUERY_SEQUENCE)
                .assert()
                .code(1)
                .stderr(predicate::str::contains("binary not found"));
            assert!(!env.path("work").exists());
        })
        .await
        .unwrap();
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_orthologs_against_mock_database() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/sequence/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(sequence_search_json("HUMAN16963"), "application/json"),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/oma/vps/HUMAN16963/fasta/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ORTHOLOG_FASTA))
        .mount(&server)
        .await;

    let uri = server.uri();
    tokio::task::spawn_blocking(move || {
        let env = TestEnvironment::new().unwrap();
        orthocons_cmd(&env)
            .arg("--oma-url")
            .arg(&uri)
            .arg("orthologs")
            .arg(QUERY_SEQUENCE)
            .assert()
            .success()
            .stdout(predicate::str::starts_with(format!(
                ">Input Sequence\n{}\n",
                QUERY_SEQUENCE
            )))
            .stdout(predicate::str::contains("HBA_MOUSE"));
    })
    .await
    .unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_database_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/sequence/"))
        .respond_with(ResponseTemplate::new(504))
        .mount(&server)
        .await;

    let uri = server.uri();
    tokio::task::spawn_blocking(move || {
        let env = TestEnvironment::new().unwrap();
        let timeout = "The database timed out. Could not determine the orthologs of your sequence. Status code 504";

        // bare surface prints the message
        orthocons_cmd(&env)
            .arg(QUERY_SEQUENCE)
            .env("ORTHOCONS_OMA_URL", &uri)
            .assert()
            .success()
            .stdout(predicate::str::contains(timeout));

        // subcommand fails with the remote-service exit code
        orthocons_cmd(&env)
            .arg("orthologs")
            .arg(QUERY_SEQUENCE)
            .env("ORTHOCONS_OMA_URL", &uri)
            .assert()
            .code(5)
            .stderr(predicate::str::contains(timeout));
    })
    .await
    .unwrap();
}

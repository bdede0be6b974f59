use anyhow::bail;
use clap::Subcommand;
use folio_client::{ContactClient, ContactForm, FormController, HttpClient, StatusKind};
use url::Url;

#[derive(Debug, Subcommand)]
pub enum ContactCommand {
    /// Submit the contact form of a running server
    Send {
        /// Base url of the server
        #[arg(long, env = "FOLIO_URL", default_value = "http://localhost:3000/")]
        url: Url,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        subject: String,
        #[arg(long)]
        message: String,
    },
}

impl ContactCommand {
    pub async fn invoke(self) -> anyhow::Result<()> {
        match self {
            ContactCommand::Send {
                url,
                name,
                email,
                subject,
                message,
            } => {
                send(
                    url,
                    ContactForm {
                        name,
                        email,
                        subject,
                        message,
                    },
                )
                .await
            }
        }
    }
}

async fn send(url: Url, form: ContactForm) -> anyhow::Result<()> {
    let client = ContactClient::new(HttpClient::new()?, &url)?;
    let mut controller = FormController::new(form);

    let status = controller.submit(&client).await;
    match status.kind {
        StatusKind::Success => {
            println!("{}", status.text);
            Ok(())
        }
        StatusKind::Error => bail!("{}", status.text),
    }
}

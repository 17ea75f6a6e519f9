//! Installation instructions written next to the generated certificate.

use crate::provision::{CERT_FILE, KEY_FILE};

/// Render `readme.md` for a certificate named `name` served at `project_url`.
pub fn render(name: &str, project_url: &str) -> String {
    format!(
        r##"# {name}

This directory holds a self-signed TLS certificate for local development.
It is ignored by git and can be deleted at any time; the next run of the
bootstrap script generates a fresh one.

| File | Contents |
| --- | --- |
| `{KEY_FILE}` | RSA-4096 private key (PEM, unencrypted) |
| `{CERT_FILE}` | Self-signed X.509 certificate (PEM) |

## Trust the certificate (macOS)

Browsers reject self-signed certificates until the system trusts them.

From a terminal in this directory:

```sh
sudo security add-trusted-cert -d -r trustRoot \
  -k /Library/Keychains/System.keychain {CERT_FILE}
```

Or with Keychain Access:

1. Open **Keychain Access** and select the **System** keychain.
2. Drag `{CERT_FILE}` into the certificate list.
3. Double-click the "{name}" entry, expand **Trust**, and set
   **When using this certificate** to **Always Trust**.
4. Close the window and confirm with your password.

## Use it

Point your HTTPS server at `{KEY_FILE}` and `{CERT_FILE}`, then open
{project_url}

To remove trust later:

```sh
sudo security delete-certificate -c "{name}" /Library/Keychains/System.keychain
```
"##
    )
}

#[cfg(target_arch = "wasm32")]
fn main() {
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    if let Err(err) = native::run() {
        eprintln!("settings_cli error: {err}");
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use curve_engine::Demo;
    use curve_engine::codec;
    use curve_engine::settings;
    use curve_engine::swizzle::SwizzleOrder;
    use serde::Serialize;
    use std::io::Read;

    const USAGE: &str = r#"settings_cli (curve-engine)

USAGE:
  settings_cli decode <token>
  settings_cli encode <json|->
  settings_cli diff <json|->
  settings_cli scene [<token>|-]
  settings_cli swizzle <order> <json|->

COMMANDS:
  decode   Print the resolved settings behind a share token
  encode   Print the share token for a (partial) settings object
  diff     Print the settings that differ from the defaults
  scene    Print the draw groups for a token (`-` or nothing: defaults)
  swizzle  Reorder a vector or {x, y, z} record (e.g. `swizzle yzx [1,2,3]`)

OPTIONS:
  --compact          Print JSON on a single line
  -h, --help         Show this help

Arguments given as `-` are read from stdin.
"#;

    pub fn run() -> Result<(), String> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        let mut args = Args::new(args);

        let Some(command) = args.next() else {
            print_usage();
            return Ok(());
        };

        match command.as_str() {
            "decode" => cmd_decode(&mut args),
            "encode" => cmd_encode(&mut args),
            "diff" => cmd_diff(&mut args),
            "scene" => cmd_scene(&mut args),
            "swizzle" => cmd_swizzle(&mut args),
            "-h" | "--help" | "help" => {
                print_usage();
                Ok(())
            }
            other => Err(format!("unknown command `{other}`\n\n{USAGE}")),
        }
    }

    fn print_usage() {
        println!("{USAGE}");
    }

    fn cmd_decode(args: &mut Args) -> Result<(), String> {
        let (token, compact) = args.input("token")?;
        let token = token.ok_or("missing token")?;

        let user = codec::decode(&token).map_err(|err| err.to_string())?;
        let resolved = settings::resolve(&user);
        print_json(&resolved.settings, compact)
    }

    fn cmd_encode(args: &mut Args) -> Result<(), String> {
        let (json, _) = args.input("settings")?;
        let json = json.ok_or("missing settings JSON")?;

        let mut demo = Demo::from_json(&json);
        let token = demo.share_token(None).map_err(|err| err.to_string())?;
        println!("{token}");
        Ok(())
    }

    fn cmd_diff(args: &mut Args) -> Result<(), String> {
        let (json, compact) = args.input("settings")?;
        let json = json.ok_or("missing settings JSON")?;

        let resolved = settings::resolve_str(&json);
        let diff = codec::settings_diff(&resolved.settings, &resolved.defaults)
            .map_err(|err| err.to_string())?;
        print_json(&diff, compact)
    }

    fn cmd_scene(args: &mut Args) -> Result<(), String> {
        let (token, compact) = args.input("token")?;
        let demo = match token.as_deref().map(str::trim) {
            Some(token) if !token.is_empty() => Demo::from_token(token),
            _ => Demo::from_json(""),
        };
        print_json(&demo.scene(), compact)
    }

    fn cmd_swizzle(args: &mut Args) -> Result<(), String> {
        let order = args.next().ok_or("missing swizzle order")?;
        let order = order
            .parse::<SwizzleOrder>()
            .map_err(|err| err.to_string())?;

        let (json, compact) = args.input("value")?;
        let json = json.ok_or("missing JSON value")?;
        let value: serde_json::Value =
            serde_json::from_str(json.trim()).map_err(|err| format!("invalid JSON: {err}"))?;

        print_json(&order.swizzle_value(&value), compact)
    }

    fn print_json<T: Serialize>(value: &T, compact: bool) -> Result<(), String> {
        let text = if compact {
            serde_json::to_string(value)
        } else {
            serde_json::to_string_pretty(value)
        }
        .map_err(|err| err.to_string())?;
        println!("{text}");
        Ok(())
    }

    fn read_stdin() -> Result<String, String> {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|err| format!("failed to read stdin: {err}"))?;
        Ok(buffer)
    }

    struct Args {
        args: Vec<String>,
        pos: usize,
    }

    impl Args {
        fn new(args: Vec<String>) -> Self {
            Self { args, pos: 0 }
        }

        fn next(&mut self) -> Option<String> {
            let arg = self.args.get(self.pos)?.clone();
            self.pos += 1;
            Some(arg)
        }

        /// Reads the remaining arguments: at most one positional input plus flags.
        fn input(&mut self, name: &str) -> Result<(Option<String>, bool), String> {
            let mut input = None;
            let mut compact = false;

            while let Some(arg) = self.next() {
                match arg.as_str() {
                    "--compact" => compact = true,
                    "-h" | "--help" => {
                        print_usage();
                        std::process::exit(0);
                    }
                    "-" if input.is_none() => input = Some(read_stdin()?),
                    value if input.is_none() && !value.starts_with("--") => {
                        input = Some(value.to_owned());
                    }
                    other => return Err(format!("unexpected argument `{other}` for {name}")),
                }
            }

            Ok((input, compact))
        }
    }
}

//! Browser UI served on `/ui`

pub const EXPLAINER_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Code Explainer</title>
    <style>
        :root {
            --violet: #7c3aed;
            --blue: #3b82f6;
            --pink: #ec4899;
            --text: #ffffff;
            --soft: #cbd5e1;
            --muted: #94a3b8;
            --panel: rgba(255, 255, 255, 0.1);
            --border: rgba(255, 255, 255, 0.2);
            --well: rgba(15, 23, 42, 0.5);
            --control: rgba(51, 65, 85, 0.5);
        }
        * { margin: 0; padding: 0; box-sizing: border-box; }
        body {
            min-height: 100vh;
            overflow-x: hidden;
            background: linear-gradient(135deg, #1e293b 0%, var(--violet) 35%, #1e293b 100%);
            font-family: system-ui, -apple-system, sans-serif;
            color: var(--text);
            padding-bottom: 4rem;
        }
        header { text-align: center; padding: 3rem 1.5rem; margin-bottom: 2rem; }
        .logo {
            display: inline-block;
            padding: 1rem;
            margin-bottom: 1.5rem;
            border-radius: 1rem;
            background: linear-gradient(135deg, var(--violet), var(--blue));
            box-shadow: 0 25px 50px -12px rgba(0, 0, 0, 0.5);
            font-size: 3rem;
            font-weight: bold;
        }
        h1 {
            font-size: 4rem;
            margin-bottom: 1rem;
            background: linear-gradient(135deg, #a855f7, var(--pink), var(--blue));
            -webkit-background-clip: text;
            background-clip: text;
            -webkit-text-fill-color: transparent;
        }
        .subtitle { font-size: 1.25rem; color: var(--soft); max-width: 42rem; margin: 0 auto; }
        .main-grid {
            display: grid;
            grid-template-columns: 1fr 1fr;
            gap: 2rem;
            padding: 0 1.5rem;
        }
        .panel {
            background: var(--panel);
            backdrop-filter: blur(20px);
            border-radius: 1.5rem;
            border: 1px solid var(--border);
            box-shadow: 0 25px 50px -12px rgba(0, 0, 0, 0.5);
            overflow: hidden;
        }
        .panel-header {
            padding: 1.5rem;
            border-bottom: 1px solid rgba(255, 255, 255, 0.1);
            display: flex;
            justify-content: space-between;
            align-items: center;
            min-height: 5.5rem;
        }
        .panel-header h2 { font-size: 1.5rem; font-weight: 600; display: flex; gap: 0.75rem; align-items: center; }
        .panel-body { padding: 1.5rem; }
        select {
            padding: 0.5rem 1rem;
            background: rgba(30, 41, 59, 0.5);
            border: 1px solid var(--border);
            border-radius: 0.75rem;
            color: var(--text);
            font-size: 0.875rem;
            outline: none;
        }
        select option { color: #0f172a; }
        .button-group { display: flex; gap: 0.5rem; margin-bottom: 1rem; }
        button {
            padding: 0.5rem 1rem;
            background: var(--control);
            border: 1px solid var(--border);
            border-radius: 0.75rem;
            color: var(--text);
            font-size: 0.875rem;
            cursor: pointer;
            transition: all 0.2s;
            outline: none;
        }
        button:hover { transform: scale(1.05); }
        button:disabled:hover { transform: scale(1); }
        textarea {
            width: 100%;
            height: 20rem;
            background: var(--well);
            border: 1px solid var(--border);
            border-radius: 0.75rem;
            padding: 1rem;
            color: var(--text);
            font-family: ui-monospace, SFMono-Regular, "SF Mono", Menlo, Monaco, Consolas, monospace;
            font-size: 0.875rem;
            resize: none;
            outline: none;
        }
        #explainBtn {
            width: 100%;
            margin-top: 1.5rem;
            padding: 1rem 1.5rem;
            border: none;
            font-size: 1rem;
            font-weight: 600;
            display: flex;
            align-items: center;
            justify-content: center;
            gap: 0.75rem;
            background: linear-gradient(135deg, var(--violet), var(--blue));
            transition: all 0.3s;
        }
        #explainBtn:disabled, #explainBtn.blank {
            background: linear-gradient(135deg, #64748b, #475569);
            cursor: not-allowed;
        }
        .actions { display: flex; gap: 0.5rem; }
        .actions button { padding: 0.5rem; }
        .state {
            height: 20rem;
            display: flex;
            flex-direction: column;
            align-items: center;
            justify-content: center;
            text-align: center;
        }
        .state.empty { color: var(--muted); }
        .state.loading { color: var(--soft); }
        .state .big { font-size: 4rem; margin-bottom: 1rem; opacity: 0.5; }
        .state .lead { font-size: 1.125rem; font-weight: 500; margin-bottom: 0.5rem; }
        .state .hint { font-size: 0.875rem; }
        .spinner {
            width: 3rem;
            height: 3rem;
            border: 4px solid rgba(124, 58, 237, 0.3);
            border-top: 4px solid var(--violet);
            border-radius: 50%;
            animation: spin 1s linear infinite;
            margin-bottom: 1rem;
        }
        #explainBtn .spinner { width: 1.25rem; height: 1.25rem; border-width: 3px; margin: 0; }
        @keyframes spin {
            0% { transform: rotate(0deg); }
            100% { transform: rotate(360deg); }
        }
        .explanation-area {
            background: var(--well);
            border-radius: 0.75rem;
            padding: 1.5rem;
            border: 1px solid rgba(255, 255, 255, 0.1);
            min-height: 20rem;
            max-height: 20rem;
            overflow-y: auto;
        }
        .explanation-text { white-space: pre-wrap; line-height: 1.6; color: #e2e8f0; }
        footer { text-align: center; margin-top: 4rem; color: var(--muted); }
        footer strong { color: #a855f7; }
        .features {
            display: grid;
            grid-template-columns: repeat(3, 1fr);
            gap: 1.5rem;
            margin-top: 4rem;
            padding: 0 1.5rem;
        }
        .feature {
            background: rgba(255, 255, 255, 0.05);
            backdrop-filter: blur(8px);
            border-radius: 1rem;
            padding: 1.5rem;
            border: 1px solid rgba(255, 255, 255, 0.1);
            text-align: center;
        }
        .feature .icon {
            width: 3rem;
            height: 3rem;
            margin: 0 auto 1rem;
            border-radius: 50%;
            background: rgba(124, 58, 237, 0.2);
            display: flex;
            align-items: center;
            justify-content: center;
            font-size: 1.5rem;
        }
        .feature h3 { font-size: 1.125rem; font-weight: 600; margin-bottom: 0.5rem; }
        .feature p { color: var(--muted); font-size: 0.875rem; }
        .hidden { display: none !important; }
        @media (max-width: 768px) {
            .main-grid, .features { grid-template-columns: 1fr; }
            h1 { font-size: 2.5rem; }
        }
    </style>
</head>
<body>
    <header>
        <div class="logo">&lt;/&gt;</div>
        <h1>Code Explainer</h1>
        <p class="subtitle">Transform complex code into clear, understandable explanations with AI-powered analysis</p>
    </header>

    <main class="main-grid">
        <section class="panel">
            <div class="panel-header">
                <h2><span style="color: #a855f7; font-size: 1.25rem;">&lt;/&gt;</span> Your Code</h2>
                <select id="language">
                    <option value="python">Python</option>
                    <option value="javascript">JavaScript</option>
                    <option value="java">Java</option>
                    <option value="cpp">C++</option>
                    <option value="html">HTML</option>
                    <option value="css">CSS</option>
                </select>
            </div>
            <div class="panel-body">
                <div class="button-group">
                    <button id="sampleBtn">📝 Load Sample</button>
                    <button id="clearBtn">🗑️ Clear All</button>
                </div>
                <textarea id="code" placeholder="Paste your code here..." spellcheck="false"></textarea>
                <button id="explainBtn">✨ Explain Code</button>
            </div>
        </section>

        <section class="panel">
            <div class="panel-header">
                <h2><span style="color: var(--blue); font-size: 1.25rem;">🤖</span> AI Explanation</h2>
                <div class="actions hidden" id="actions">
                    <button id="copyBtn" title="Copy explanation">📋</button>
                    <button id="downloadBtn" title="Download explanation">💾</button>
                </div>
            </div>
            <div class="panel-body">
                <div class="state empty" id="emptyState">
                    <div class="big">&lt;/&gt;</div>
                    <p class="lead">Ready to explain your code</p>
                    <p class="hint">Paste your code on the left and click "Explain Code" to get started</p>
                </div>
                <div class="state loading hidden" id="loadingState">
                    <div class="spinner"></div>
                    <p class="lead">AI is analyzing your code...</p>
                    <p class="hint" style="opacity: 0.7;">This may take a few seconds</p>
                </div>
                <div class="explanation-area hidden" id="explanationArea">
                    <div class="explanation-text" id="explanationText"></div>
                </div>
            </div>
        </section>
    </main>

    <footer>
        <p>Powered by <strong>Ollama AI</strong> ✨</p>
    </footer>

    <section class="features">
        <div class="feature">
            <div class="icon">⚡</div>
            <h3>Instant Analysis</h3>
            <p>Get immediate explanations for any code snippet</p>
        </div>
        <div class="feature">
            <div class="icon">🔧</div>
            <h3>Multi-Language</h3>
            <p>Support for Python, JavaScript, Java, and more</p>
        </div>
        <div class="feature">
            <div class="icon">🤖</div>
            <h3>AI Powered</h3>
            <p>Advanced AI models for accurate explanations</p>
        </div>
    </section>

    <script>
        const EXPLAIN_URL = '/api/explain';
        const FAILURE_TEXT = 'Sorry, there was an error explaining the code. Please try again.';
        const COPY_RESET_MS = 2000;

        const SAMPLES = {
            python: `def fibonacci(n):
    if n <= 1:
        return n
    return fibonacci(n-1) + fibonacci(n-2)

print(fibonacci(5))`,
            javascript: `function calculateTotal(items) {
    return items.reduce((sum, item) => {
        return sum + item.price * item.quantity;
    }, 0);
}`,
            java: `public class Calculator {
    public static int add(int a, int b) {
        return a + b;
    }
}`
        };

        const state = {
            code: '',
            explanation: '',
            loading: false,
            language: 'python',
            copied: false
        };

        const el = id => document.getElementById(id);
        const codeInput = el('code');
        const languageSelect = el('language');

        function render() {
            if (codeInput.value !== state.code) {
                codeInput.value = state.code;
            }
            languageSelect.value = state.language;

            const btn = el('explainBtn');
            btn.disabled = state.loading;
            btn.classList.toggle('blank', !state.code.trim());
            btn.innerHTML = state.loading
                ? '<div class="spinner"></div> Analyzing Code...'
                : '✨ Explain Code';

            const hasExplanation = state.explanation !== '';
            el('emptyState').classList.toggle('hidden', hasExplanation || state.loading);
            el('loadingState').classList.toggle('hidden', !state.loading);
            el('explanationArea').classList.toggle('hidden', !hasExplanation);
            el('actions').classList.toggle('hidden', !hasExplanation);
            el('explanationText').textContent = state.explanation;
            el('copyBtn').textContent = state.copied ? '✅' : '📋';
        }

        function update(patch) {
            Object.assign(state, patch);
            render();
        }

        async function explainCode() {
            if (!state.code.trim()) {
                alert('Please enter some code to explain!');
                return;
            }

            update({ loading: true });
            try {
                const response = await fetch(EXPLAIN_URL, {
                    method: 'POST',
                    headers: { 'Content-Type': 'application/json' },
                    body: JSON.stringify({ code: state.code, language: state.language })
                });
                if (!response.ok) {
                    throw new Error(`HTTP error! status: ${response.status}`);
                }
                const data = await response.json();
                if (typeof data.explanation !== 'string') {
                    throw new Error('Response has no explanation');
                }
                state.explanation = data.explanation;
            } catch (error) {
                console.error('Error:', error);
                state.explanation = FAILURE_TEXT;
            } finally {
                update({ loading: false });
            }
        }

        async function copyToClipboard() {
            try {
                await navigator.clipboard.writeText(state.explanation);
                update({ copied: true });
                // Each copy arms its own timer; overlapping timers all clear to false.
                setTimeout(() => update({ copied: false }), COPY_RESET_MS);
            } catch (err) {
                console.error('Failed to copy:', err);
            }
        }

        function downloadExplanation() {
            const blob = new Blob(
                [`Code:\n${state.code}\n\nExplanation:\n${state.explanation}`],
                { type: 'text/plain' }
            );
            const link = document.createElement('a');
            link.href = URL.createObjectURL(blob);
            link.download = `code-explanation-${Date.now()}.txt`;
            document.body.appendChild(link);
            link.click();
            document.body.removeChild(link);
            URL.revokeObjectURL(link.href);
        }

        function loadSample() {
            update({ code: SAMPLES[state.language] || SAMPLES.python });
        }

        function clearAll() {
            update({ code: '', explanation: '' });
        }

        codeInput.addEventListener('input', e => update({ code: e.target.value }));
        languageSelect.addEventListener('change', e => update({ language: e.target.value }));
        el('explainBtn').addEventListener('click', explainCode);
        el('copyBtn').addEventListener('click', copyToClipboard);
        el('downloadBtn').addEventListener('click', downloadExplanation);
        el('sampleBtn').addEventListener('click', loadSample);
        el('clearBtn').addEventListener('click', clearAll);

        render();
    </script>
</body>
</html>
"##;
